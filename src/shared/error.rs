//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for `serialization_failure`.
const PG_SERIALIZATION_FAILURE: &str = "40001";

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A concurrent writer won: unique constraint or serialization failure.
    #[error("Write conflict: {0}")]
    WriteConflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
}

impl AppError {
    /// Translate a sqlx error raised by a write, turning constraint and
    /// serialization failures into [`AppError::WriteConflict`].
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::WriteConflict(db_err.message().to_string());
            }
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) | Some(PG_SERIALIZATION_FAILURE) => {
                    return AppError::WriteConflict(db_err.message().to_string());
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }

    /// Whether this error is a store-level write conflict.
    pub fn is_write_conflict(&self) -> bool {
        matches!(self, AppError::WriteConflict(_))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, 10001, msg, None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, 10005, msg, None),
            AppError::WriteConflict(msg) => {
                tracing::warn!("Write conflict: {}", msg);
                let msg = "Concurrent update, please retry".to_string();
                (StatusCode::CONFLICT, 10005, msg, None)
            }
            AppError::Validation { message, errors } => {
                (StatusCode::BAD_REQUEST, 10007, message, Some(errors))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let msg = "Internal server error".to_string();
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, msg, None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                let msg = "Internal server error".to_string();
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, msg, None)
            }
        };

        let body = ErrorResponse {
            code,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}
