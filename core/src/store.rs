//! Local cache of the remote pet collection.
//!
//! # Design
//! `PetStore` is the single writer of the cached list. It never talks to the
//! network; the `apply_*` methods are the reconciliation rules that fold a
//! parsed response into the cache. Hosts that overlap requests call them in
//! whatever order responses resolve, so the last response to resolve wins.
//!
//! The filtered view is derived from the full list on every read and is
//! never stored, which keeps the two from drifting apart after a mutation.
//!
//! Concurrent edits from other clients are not detected. An update submits
//! the locally cached copy and can overwrite newer server state.

use tracing::{debug, warn};

use crate::error::{ApiError, StoreError};
use crate::filter::SearchFilter;
use crate::types::{Pet, PetDraft, PetId};

/// Network operation a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message shown to the user when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Error fetching data",
            Operation::Create => "Error creating pet",
            Operation::Update => "Error updating pet",
            Operation::Delete => "Error deleting pet",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// The one in-progress edit: a copy of a cached record being modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    id: PetId,
    buffer: PetDraft,
}

impl EditSession {
    pub fn id(&self) -> PetId {
        self.id
    }

    pub fn buffer_mut(&mut self) -> &mut PetDraft {
        &mut self.buffer
    }

    /// The full record an update would submit.
    pub fn to_pet(&self) -> Pet {
        Pet::from_draft(self.id, self.buffer.clone())
    }
}

#[derive(Debug, Default)]
pub struct PetStore {
    pets: Vec<Pet>,
    filter: SearchFilter,
    load_state: LoadState,
    error: Option<String>,
    edit: Option<EditSession>,
}

impl PetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full cached list, in the order the backend returned it.
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// The filtered view.
    pub fn visible(&self) -> Vec<&Pet> {
        self.filter.apply(&self.pets)
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// The user-visible error message, if the last failure is still shown.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: PetId) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == id)
    }

    /// Replace the filter and return the resulting view.
    pub fn search(&mut self, query: &str) -> Vec<&Pet> {
        self.filter = SearchFilter::new(query);
        self.visible()
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Replace the cache with a freshly listed collection. The current
    /// filter is kept and applies to the new list. An edit session whose
    /// record is gone from the new list is discarded.
    pub fn apply_loaded(&mut self, pets: Vec<Pet>) {
        debug!(count = pets.len(), "pets loaded");
        if let Some(id) = self.edit.as_ref().map(EditSession::id) {
            if !pets.iter().any(|pet| pet.id == id) {
                self.close_edit_for(id);
            }
        }
        self.pets = pets;
        self.load_state = LoadState::Loaded;
        self.error = None;
    }

    /// Add a created record. A record whose id is already cached replaces
    /// the cached copy, so each id appears once.
    pub fn apply_created(&mut self, pet: Pet) {
        debug!(id = %pet.id, "pet created");
        match self.pets.iter_mut().find(|cached| cached.id == pet.id) {
            Some(cached) => *cached = pet,
            None => self.pets.push(pet),
        }
        self.error = None;
    }

    /// Replace the cached record with the same id. Returns `false` when the
    /// id is no longer cached, in which case the response is dropped.
    pub fn apply_updated(&mut self, pet: Pet) -> bool {
        self.close_edit_for(pet.id);
        self.error = None;
        match self.pets.iter_mut().find(|cached| cached.id == pet.id) {
            Some(cached) => {
                debug!(id = %pet.id, "pet updated");
                *cached = pet;
                true
            }
            None => {
                debug!(id = %pet.id, "update for uncached pet dropped");
                false
            }
        }
    }

    /// Remove the record with `id`. Returns whether it was cached.
    pub fn apply_deleted(&mut self, id: PetId) -> bool {
        self.close_edit_for(id);
        self.error = None;
        let before = self.pets.len();
        self.pets.retain(|pet| pet.id != id);
        debug!(%id, "pet deleted");
        self.pets.len() != before
    }

    /// Record a failed network operation. The cache is left untouched; a
    /// failed update also discards the open edit session.
    pub fn apply_failure(&mut self, operation: Operation, err: &ApiError) {
        warn!(?operation, error = %err, "pets request failed");
        self.error = Some(operation.failure_message().to_string());
        match operation {
            Operation::Load => self.load_state = LoadState::Errored,
            Operation::Update => self.edit = None,
            Operation::Create | Operation::Delete => {}
        }
    }

    /// Look up a cached record for display. A miss is reported through the
    /// same error message as network failures.
    pub fn lookup(&mut self, id: PetId) -> Result<&Pet, StoreError> {
        match self.pets.iter().position(|pet| pet.id == id) {
            Some(index) => Ok(&self.pets[index]),
            None => Err(self.report(StoreError::NotCached(id))),
        }
    }

    /// Open an edit session seeded from the cached record.
    pub fn begin_edit(&mut self, id: PetId) -> Result<&mut EditSession, StoreError> {
        if let Some(open) = self.edit.as_ref().map(|session| session.id) {
            return Err(self.report(StoreError::EditInProgress(open)));
        }
        let buffer = match self.get(id) {
            Some(pet) => pet.to_draft(),
            None => return Err(self.report(StoreError::NotCached(id))),
        };
        Ok(self.edit.insert(EditSession { id, buffer }))
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// The record the open edit session would submit. The session stays
    /// open until the update succeeds, fails or is cancelled.
    pub fn edit_submission(&self) -> Result<Pet, StoreError> {
        self.edit
            .as_ref()
            .map(EditSession::to_pet)
            .ok_or(StoreError::NoEditInProgress)
    }

    pub fn cancel_edit(&mut self) -> Option<EditSession> {
        self.edit.take()
    }

    /// Close the edit session if it belongs to `id`.
    pub(crate) fn close_edit_for(&mut self, id: PetId) {
        if self.edit.as_ref().is_some_and(|session| session.id == id) {
            debug!(%id, "edit session closed");
            self.edit = None;
        }
    }

    fn report(&mut self, err: StoreError) -> StoreError {
        warn!(error = %err, "pet store operation rejected");
        self.error = Some(err.to_string());
        err
    }
}
