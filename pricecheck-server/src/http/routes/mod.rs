//! Route handlers organized by resource

pub mod health;
pub mod index;
pub mod products;
pub mod search;

use serde::Serialize;

/// `{"message": "..."}` body shared by the success responses
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
