//! HTTP error handling and response types.
//!
//! Three outcomes, three status codes:
//! - validation failures → 400 with `{"errors": [...]}`
//! - missing records → 404 with `{"error": "<Entity> not found"}`
//! - everything unexpected → 500 with a generic body (details are logged,
//!   not served)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::db::repository::RepositoryError;

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request payload or constraint violation
    Validation(Vec<String>),
    /// Resource not found; carries the entity name for the response body
    NotFound(&'static str),
    /// Internal server error
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{} not found", entity) })),
            )
                .into_response(),
            AppError::Internal(message) => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, .. } => AppError::NotFound(entity),
            RepositoryError::Validation { message } => AppError::Validation(vec![message]),
            other => AppError::Internal(other.to_string()),
        }
    }
}
