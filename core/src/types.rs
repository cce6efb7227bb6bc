//! Domain DTOs for the pets API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The backend speaks Spanish field names (`nombre`, `raza`, `edad`); the
//! Rust side uses English names and `serde(rename)` keeps the wire format
//! exact. Integration tests catch any schema drift between the two crates.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(pub u64);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PetId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PetId)
    }
}

/// A single pet record as persisted by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "raza")]
    pub breed: String,
    #[serde(rename = "edad")]
    pub age: u32,
}

impl Pet {
    pub fn from_draft(id: PetId, draft: PetDraft) -> Self {
        Self {
            id,
            name: draft.name,
            breed: draft.breed,
            age: draft.age,
        }
    }

    pub fn to_draft(&self) -> PetDraft {
        PetDraft {
            name: self.name.clone(),
            breed: self.breed.clone(),
            age: self.age,
        }
    }
}

/// A pet without an identifier. Posted to create a record, and used as the
/// edit buffer for a full replacement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "raza")]
    pub breed: String,
    #[serde(rename = "edad")]
    pub age: u32,
}
