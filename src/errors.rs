use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;
use crate::validation::FieldErrors;

/// Everything a handler can fail with, mapped one-to-one onto an HTTP
/// status. Storage messages pass through verbatim; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("Invalid status value: {0}")]
    InvalidFilter(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body shape: `error` is always present; `fields` carries the
/// per-field reasons on validation failures so the 400 stays
/// machine-parsable.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Validation(fields) => ErrorResponse {
                error: "validation failed".to_string(),
                fields: Some(fields),
            },
            other => ErrorResponse {
                error: other.to_string(),
                fields: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
