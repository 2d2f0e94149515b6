pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod thumbnails;
pub mod videos;

pub use routes::create_router;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use vidvault_core::{SyncError, ThumbnailError};

/// Error body returned by all API endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API-level errors mapped onto HTTP statuses.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown video id, or content not cached yet.
    NotFound(String),
    /// The remote catalog failed or answered garbage.
    Upstream(String),
    /// Local failure (filesystem, encoding).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Upstream(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<SyncError> for ApiError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Remote(_) => ApiError::Upstream(e.to_string()),
            SyncError::Store(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ThumbnailError> for ApiError {
    fn from(e: ThumbnailError) -> Self {
        match e {
            ThumbnailError::Remote(_) | ThumbnailError::InvalidImage { .. } => {
                ApiError::Upstream(e.to_string())
            }
            ThumbnailError::Store(_) => ApiError::Internal(e.to_string()),
        }
    }
}
