//! Synchronous API client core for the pets service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps a local cache of
//! the remote pet collection in sync with the results.
//!
//! # Design
//! - `PetClient` is stateless: it holds only `base_url` and the item-path
//!   policy.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `PetStore` is the cache with its reconciliation rules; the filtered
//!   view is always derived from the full list.
//! - `PetListView` dispatches the closed `Command` set through a host
//!   `Transport`, one request at a time.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod command;
pub mod error;
pub mod filter;
pub mod http;
pub mod store;
pub mod types;

pub use client::PetClient;
pub use command::{Command, Outcome, PetListView};
pub use error::{ApiError, StoreError, ViewError};
pub use filter::SearchFilter;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use store::{EditSession, LoadState, Operation, PetStore};
pub use types::{Pet, PetDraft, PetId};
