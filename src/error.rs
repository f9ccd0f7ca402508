//! Request-level error type mapped onto the wire shapes the frontend expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request: unknown tab label, missing fields, bad multipart body.
    #[error("{0}")]
    BadRequest(String),

    /// Any backend failure during an upload batch. Fatal to the request,
    /// never retried; the raw backend message is passed through.
    #[error("{0}")]
    Internal(String),

    /// Any backend failure during a delete. Same policy, different body shape.
    #[error("{0}")]
    Delete(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "Bad Request",
                    "message": message,
                })),
            )
                .into_response(),
            AppError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Internal Server Error",
                    "message": message,
                })),
            )
                .into_response(),
            AppError::Delete(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": "Error deleting file",
                    "error": message,
                })),
            )
                .into_response(),
        }
    }
}
