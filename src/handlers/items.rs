use std::str::FromStr;

use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::common::{created_response, no_content_response, success_response};
use crate::errors::ApiError;
use crate::models::TicketStatus;
use crate::store::StoreError;
use crate::validation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

/// GET /items — all tickets newest first, optionally filtered by status.
async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = params
        .status
        .as_deref()
        .map(|raw| TicketStatus::from_str(raw).map_err(|_| ApiError::InvalidFilter(raw.into())))
        .transpose()?;
    let tickets = state.store.list(filter).await?;
    Ok(success_response(tickets))
}

/// GET /items/:id — a single ticket. Any storage failure on a single-row
/// fetch, including zero matching rows, reads as "not found" here.
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let ticket = state
        .store
        .get(id)
        .await
        .map_err(|_| ApiError::NotFound(format!("item {id} not found")))?;
    Ok(success_response(ticket))
}

/// POST /items — validate in create mode, insert, return the stored row.
async fn create_item(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = validation::parse_create(&body).map_err(ApiError::Validation)?;
    let ticket = state.store.insert(payload).await?;
    Ok(created_response(ticket))
}

/// PATCH /items/:id — validate in update mode and apply only the supplied
/// fields. A missing row is a 404; any other storage fault stays a 500.
async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = validation::parse_update(&body).map_err(ApiError::Validation)?;
    let ticket = state.store.update(id, payload).await.map_err(|err| match err {
        StoreError::RowNotFound => ApiError::NotFound(format!("item {id} not found")),
        other => ApiError::Storage(other),
    })?;
    Ok(success_response(ticket))
}

/// DELETE /items/:id — unconditional; succeeds even when no row matched.
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete(id).await?;
    Ok(no_content_response())
}

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/", get(list_items))
        .route("/:id", get(get_item))
        .route("/:id", patch(update_item))
        .route("/:id", delete(delete_item))
}
