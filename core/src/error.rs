//! Error types for the pets API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. `Transport` is reported by the host
//! when the round-trip itself failed and no response exists.

use thiserror::Error;

use crate::types::PetId;

/// Errors returned by `PetClient` parse methods and by `Transport` hosts.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested pet does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors raised by local cache operations that never touch the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Pet {0} not found")]
    NotCached(PetId),

    #[error("Pet {0} is already being edited")]
    EditInProgress(PetId),

    #[error("No edit in progress")]
    NoEditInProgress,
}

/// Error returned by `PetListView::dispatch`.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
