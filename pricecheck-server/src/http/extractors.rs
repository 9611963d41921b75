//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use pricecheck_core::{CoreError, ProductPayload};
use serde_json::Value;

use super::error::ApiError;

/// Extract and validate a product body.
///
/// Unlike `axum::Json`, every failure (missing body, bad JSON, wrong shape,
/// missing `codigo`) is a 400 with a JSON error payload, and the
/// `Content-Type` header is not checked.
pub struct ValidProduct(pub ProductPayload);

impl<S> FromRequest<S> for ValidProduct
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(CoreError::EmptyPayload.into());
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(CoreError::invalid_json)?;
        Ok(Self(ProductPayload::from_value(value)?))
    }
}
