//! Error types for the backing store and the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use sessionq::log;

/// Failures talking to the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Table `sessions` is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Store worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Errors surfaced by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Store(err) => {
                log::error!("Backing store failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to query sessions",
                )
                    .into_response()
            }
        }
    }
}
