use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::error::{AppError, StorageError};

/// API-level error that maps onto an HTTP response.
///
/// Every variant renders as a JSON body `{ "detail": <message> }` with the
/// matching status code.
#[derive(Debug)]
pub enum ApiError {
    /// A required input field was missing or blank → 400.
    Validation(String),
    /// The referenced record does not exist → 404.
    NotFound(String),
    /// The completion provider failed; carries its detail → 500.
    Upstream(String),
    /// Storage or other internal failure → 500.
    Internal(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation { field, reason } => {
                ApiError::Validation(format!("{}: {}", field, reason))
            }
            AppError::Completion(e) => ApiError::Upstream(e.to_string()),
            AppError::Storage(e) => ApiError::Internal(format!("Database error: {}", e)),
            AppError::Config { message } => ApiError::Internal(message),
            AppError::Internal { message } => ApiError::Internal(message),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(format!("Database error: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::Upstream(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
            ApiError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
