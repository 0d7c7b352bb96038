//! Error types for the todo service
//!
//! Provides structured error handling using thiserror for all error cases
//! encountered at the handler boundary: request validation, body decoding,
//! and document store operations. Every error converts directly into an
//! HTTP response; nothing propagates past the handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;

/// Main error type for todo operations
#[derive(Error, Debug)]
pub enum TodoApiError {
    /// Path id is not a valid hex object id
    #[error("invalid todo id: {0}")]
    InvalidId(String),

    /// Title missing or empty on create/update
    #[error("the title field is required")]
    EmptyTitle,

    /// Request body failed to decode as JSON of the expected shape
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// No document matched the given id
    #[error("todo not found")]
    NotFound,

    /// Document store operation failed
    #[error("storage error: {0}")]
    Storage(#[from] mongodb::error::Error),
}

impl From<StoreError> for TodoApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => TodoApiError::NotFound,
            StoreError::Backend(e) => TodoApiError::Storage(e),
        }
    }
}

/// JSON error envelope returned for every failed request
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for TodoApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            TodoApiError::InvalidId(_) => (
                StatusCode::BAD_REQUEST,
                "The id is invalid".to_string(),
                None,
            ),
            TodoApiError::EmptyTitle => (
                StatusCode::BAD_REQUEST,
                "The title field is required".to_string(),
                None,
            ),
            TodoApiError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                "The request body is not valid JSON".to_string(),
                Some(detail),
            ),
            TodoApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "Todo not found".to_string(),
                None,
            ),
            TodoApiError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The storage operation failed".to_string(),
                Some(e.to_string()),
            ),
        };

        (
            status,
            Json(ErrorBody {
                message,
                error: detail,
            }),
        )
            .into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TodoApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                TodoApiError::InvalidId("xyz".into()),
                StatusCode::BAD_REQUEST,
            ),
            (TodoApiError::EmptyTitle, StatusCode::BAD_REQUEST),
            (
                TodoApiError::MalformedBody("expected value".into()),
                StatusCode::BAD_REQUEST,
            ),
            (TodoApiError::NotFound, StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = TodoApiError::from(StoreError::NotFound);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
