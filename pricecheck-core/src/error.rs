/// Structured error types for pricecheck-core.
///
/// Every variant describes a client-side problem with a product payload;
/// the server maps all of them to `400 Bad Request`.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Body was absent, empty, or `{}`
    #[error("request body must be a non-empty JSON object")]
    EmptyPayload,

    /// Body parsed but was an array, string, number...
    #[error("request body must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    /// Body could not be parsed as JSON at all
    #[error("invalid JSON: {reason}")]
    InvalidJson { reason: String },

    /// Required field missing (or present but unusable)
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },

    /// Field present with the wrong shape
    #[error("field '{field}' {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// Result type alias for pricecheck-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a missing field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an invalid JSON error
    pub fn invalid_json(reason: impl ToString) -> Self {
        Self::InvalidJson {
            reason: reason.to_string(),
        }
    }
}
