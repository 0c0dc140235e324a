//! Ticket storage backends.
//!
//! Handlers talk to storage through the [`TicketStore`] trait; the concrete
//! backend is chosen once at startup and injected as a shared trait object.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Ticket, TicketPayload, TicketStatus};

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Fault reported by the ticket storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend executed the request and reported an error. The message
    /// is the backend's own, passed through verbatim.
    #[error("{0}")]
    Backend(String),

    /// A single-row operation matched no rows.
    #[error("no matching row")]
    RowNotFound,

    /// The request never produced a backend response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Table-level CRUD over wash tickets.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// All tickets ordered by `created_at` descending, equality-filtered by
    /// status when given.
    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, StoreError>;

    /// Exactly one ticket by id.
    async fn get(&self, id: Uuid) -> Result<Ticket, StoreError>;

    /// Inserts one ticket and returns it with backend-assigned `id` and
    /// `created_at`.
    async fn insert(&self, payload: TicketPayload) -> Result<Ticket, StoreError>;

    /// Applies the supplied fields to the ticket identified by `id` and
    /// returns the full updated row.
    async fn update(&self, id: Uuid, payload: TicketPayload) -> Result<Ticket, StoreError>;

    /// Deletes the ticket identified by `id`. Succeeds even when no row
    /// matched.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Stand-in installed at startup when the REST backend credentials are
/// absent. Requests are routed normally and fail at the storage call.
pub struct UnconfiguredStore;

impl UnconfiguredStore {
    fn error() -> StoreError {
        StoreError::Backend(
            "ticket storage is not configured: set APP__STORAGE_URL and APP__STORAGE_SERVICE_KEY"
                .to_string(),
        )
    }
}

#[async_trait]
impl TicketStore for UnconfiguredStore {
    async fn list(&self, _status: Option<TicketStatus>) -> Result<Vec<Ticket>, StoreError> {
        Err(Self::error())
    }

    async fn get(&self, _id: Uuid) -> Result<Ticket, StoreError> {
        Err(Self::error())
    }

    async fn insert(&self, _payload: TicketPayload) -> Result<Ticket, StoreError> {
        Err(Self::error())
    }

    async fn update(&self, _id: Uuid, _payload: TicketPayload) -> Result<Ticket, StoreError> {
        Err(Self::error())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(Self::error())
    }
}
