//! Application Error Types
//!
//! Closed error taxonomy for every repository and service operation, with a
//! pure mapping from variant to HTTP status and Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forum owner not found: {0}")]
    OwnerNotFound(String),

    #[error("Forum not found: {0}")]
    ForumNotFound(String),

    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    #[error("Invalid parent post: {0}")]
    InvalidParent(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Transport status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_)
            | AppError::OwnerNotFound(_)
            | AppError::ForumNotFound(_)
            | AppError::AuthorNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::InvalidParent(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable numeric code carried in the error body.
    pub fn code(&self) -> u16 {
        match self {
            AppError::Internal(_) | AppError::Database(_) => 10000,
            AppError::NotFound(_) => 10001,
            AppError::BadRequest(_) => 10002,
            AppError::Conflict(_) => 10005,
            AppError::Validation(_) => 10007,
            AppError::OwnerNotFound(_) => 10011,
            AppError::ForumNotFound(_) => 10012,
            AppError::AuthorNotFound(_) => 10013,
            AppError::InvalidParent(_) => 10014,
        }
    }

    /// Whether this error is a uniqueness violation reported by the store.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            code: self.code(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
