// rest_api/src/error.rs

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use storage::StorageError;

/// Handler-level failures. Callers get a fixed status plus a human-readable
/// message; database, missing-resource and validation failures are not
/// otherwise distinguishable, and nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] security::AuthError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Storage(StorageError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, msg.clone())
            }
            ApiError::Storage(StorageError::InvalidData(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string()),
            ApiError::Auth(security::AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::Auth(security::AuthError::InvalidToken) => {
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ApiError::Auth(security::AuthError::OAuth(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "OAuth authentication failed".to_string(),
            ),
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Multipart(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Io(_) | ApiError::SerdeJson(_) | ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
            ),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));
        (status, body).into_response()
    }
}
