//! Stateless HTTP request builder and response parser for the pets API.
//!
//! # Design
//! `PetClient` holds only a `base_url` and the item-path policy, and carries
//! no mutable state between calls. Each CRUD operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The caller executes the actual HTTP round-trip,
//! keeping the core deterministic and free of I/O dependencies.
//!
//! The collection path is always `/pets/`. Item paths default to
//! `/pets/{id}/`; backends that route `/pets/{id}` only can be reached by
//! turning the trailing slash off with [`PetClient::with_trailing_slash`].

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Pet, PetDraft, PetId};

/// Synchronous, stateless client for the pets API.
#[derive(Debug, Clone)]
pub struct PetClient {
    base_url: String,
    trailing_slash: bool,
}

impl PetClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            trailing_slash: true,
        }
    }

    /// Whether item paths (`update`, `delete`) end with a `/`.
    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    fn collection_path(&self) -> String {
        format!("{}/pets/", self.base_url)
    }

    fn item_path(&self, id: PetId) -> String {
        if self.trailing_slash {
            format!("{}/pets/{id}/", self.base_url)
        } else {
            format!("{}/pets/{id}", self.base_url)
        }
    }

    pub fn build_list_pets(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_pet(&self, draft: &PetDraft) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: json_headers(),
            body: Some(to_json(draft)?),
        })
    }

    /// Full replacement of the record keyed by `pet.id`.
    ///
    /// Nothing guards against overwriting newer server state: the body is
    /// whatever the local copy holds, stale or not.
    pub fn build_update_pet(&self, pet: &Pet) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_path(pet.id),
            headers: json_headers(),
            body: Some(to_json(pet)?),
        })
    }

    pub fn build_delete_pet(&self, id: PetId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_pets(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        check_success(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_pet(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        check_success(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_pet(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        check_success(&response)?;
        from_json(&response.body)
    }

    /// The body of a successful delete is ignored.
    pub fn parse_delete_pet(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
