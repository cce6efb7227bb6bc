//! Command dispatch for the pet list.
//!
//! # Design
//! Every user action is one `Command`. `PetListView::dispatch` builds the
//! request with `PetClient`, runs it through the host's `Transport`, parses
//! the response and folds the result into `PetStore`. Requests run one at a
//! time; hosts that need overlapping requests drive `PetStore` directly.

use tracing::debug;

use crate::client::PetClient;
use crate::error::{ApiError, ViewError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::store::{Operation, PetStore};
use crate::types::{Pet, PetDraft, PetId};

/// The closed set of actions on the pet list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the whole collection.
    List,
    /// Change the local filter. No request is made.
    Search(String),
    Create(PetDraft),
    /// Replace every field of the pet with `id`.
    Update { id: PetId, patch: PetDraft },
    Delete(PetId),
    /// Show one cached pet. No request is made.
    View(PetId),
}

/// What a successfully dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded { count: usize },
    Searched { matches: usize },
    Created(Pet),
    Updated(Pet),
    Deleted(PetId),
    Viewed(Pet),
}

/// Owns the cache and the means to sync it with the backend.
pub struct PetListView<T> {
    client: PetClient,
    transport: T,
    store: PetStore,
}

impl<T: Transport> PetListView<T> {
    pub fn new(client: PetClient, transport: T) -> Self {
        Self {
            client,
            transport,
            store: PetStore::new(),
        }
    }

    pub fn store(&self) -> &PetStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PetStore {
        &mut self.store
    }

    /// Initial load. Runs once; there is no refresh interval.
    pub fn mount(&mut self) -> Result<Outcome, ViewError> {
        self.dispatch(Command::List)
    }

    /// Submit the open edit session as a full replacement.
    pub fn submit_edit(&mut self) -> Result<Outcome, ViewError> {
        let pet = self.store.edit_submission()?;
        self.dispatch(Command::Update {
            id: pet.id,
            patch: pet.to_draft(),
        })
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, ViewError> {
        match command {
            Command::List => {
                self.store.begin_load();
                let request = self.client.build_list_pets();
                let pets = self
                    .send(Operation::Load, request)
                    .and_then(|response| self.client.parse_list_pets(response))
                    .map_err(|err| self.fail(Operation::Load, err))?;
                let count = pets.len();
                self.store.apply_loaded(pets);
                Ok(Outcome::Loaded { count })
            }
            Command::Search(query) => {
                let matches = self.store.search(&query).len();
                Ok(Outcome::Searched { matches })
            }
            Command::Create(draft) => {
                let pet = self
                    .client
                    .build_create_pet(&draft)
                    .and_then(|request| self.send(Operation::Create, request))
                    .and_then(|response| self.client.parse_create_pet(response))
                    .map_err(|err| self.fail(Operation::Create, err))?;
                self.store.apply_created(pet.clone());
                Ok(Outcome::Created(pet))
            }
            Command::Update { id, patch } => {
                if let Some(err) = self.store.lookup(id).err() {
                    self.store.close_edit_for(id);
                    return Err(err.into());
                }
                let pet = self
                    .client
                    .build_update_pet(&Pet::from_draft(id, patch))
                    .and_then(|request| self.send(Operation::Update, request))
                    .and_then(|response| self.client.parse_update_pet(response))
                    .map_err(|err| self.fail(Operation::Update, err))?;
                self.store.apply_updated(pet.clone());
                Ok(Outcome::Updated(pet))
            }
            Command::Delete(id) => {
                let request = self.client.build_delete_pet(id);
                self.send(Operation::Delete, request)
                    .and_then(|response| self.client.parse_delete_pet(response))
                    .map_err(|err| self.fail(Operation::Delete, err))?;
                self.store.apply_deleted(id);
                Ok(Outcome::Deleted(id))
            }
            Command::View(id) => {
                let pet = self.store.lookup(id)?.clone();
                Ok(Outcome::Viewed(pet))
            }
        }
    }

    fn send(&mut self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(?operation, method = %request.method, path = %request.path, "sending pets request");
        self.transport.execute(request)
    }

    fn fail(&mut self, operation: Operation, err: ApiError) -> ViewError {
        self.store.apply_failure(operation, &err);
        err.into()
    }
}
