use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use strum::IntoEnumIterator;

use crate::models::TicketStatus;
use crate::AppState;

/// GET / — service banner, also the health check.
async fn service_info() -> impl IntoResponse {
    Json(json!({
        "name": "Sepatu Wash API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "docs": "/docs",
    }))
}

/// GET /docs — route map, with the status filter values spelled out.
async fn route_docs() -> impl IntoResponse {
    let statuses = TicketStatus::iter()
        .map(|status| status.to_string())
        .collect::<Vec<_>>()
        .join("|");

    Json(json!({
        "routes": {
            "list": format!("GET /items?status={statuses}"),
            "detail": "GET /items/:id",
            "create": "POST /items",
            "update": "PATCH /items/:id",
            "delete": "DELETE /items/:id",
        }
    }))
}

pub fn meta_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/docs", get(route_docs))
}
