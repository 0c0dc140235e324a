//! Sepatu Wash API Library
//!
//! CRUD service over shoe-wash tickets, backed by a managed PostgREST
//! database. Handlers validate input, make exactly one storage call, and
//! map the outcome to an HTTP response.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
pub mod validation;

use std::sync::Arc;

use axum::Router;

use crate::store::TicketStore;

/// Shared per-request state: the storage backend chosen at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TicketStore>,
}

/// Builds the application router. Integration tests drive this directly,
/// with an in-memory store substituted for the REST backend.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(handlers::meta::meta_routes())
        .nest("/items", handlers::items::item_routes())
        .with_state(state)
}
