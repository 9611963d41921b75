//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes:
//! client mistakes become `{"error"}` with 400, empty searches become
//! `{"message"}` with 404, and storage failures become `{"error", "details"}`
//! with 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pricecheck_core::CoreError;
use serde_json::json;

use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Bad parameter or body (400)
    Validation { message: String },

    /// Valid request, nothing matched (404)
    NotFound { message: String },

    /// Storage or connectivity failure (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { message } => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            Self::NotFound { message } => (StatusCode::NOT_FOUND, json!({ "message": message })),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal server error",
                        "details": e.to_string()
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Invalid(e) => e.into(),
            _ => Self::Database(e),
        }
    }
}
