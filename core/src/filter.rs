//! Case-insensitive name search over the cached pets.

use crate::types::Pet;

/// The current search query. An empty query matches every pet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
    needle: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            needle: query.to_lowercase(),
        }
    }

    /// The query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, pet: &Pet) -> bool {
        self.is_empty() || pet.name.to_lowercase().contains(&self.needle)
    }

    /// The filtered view of `pets`, in list order.
    pub fn apply<'a>(&self, pets: &'a [Pet]) -> Vec<&'a Pet> {
        pets.iter().filter(|pet| self.matches(pet)).collect()
    }
}
