//! Product create/update endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use super::MessageResponse;
use crate::db::{ProductRepo, UpsertOutcome};
use crate::http::error::ApiError;
use crate::http::extractors::ValidProduct;
use crate::http::server::AppState;

/// POST /api/product - create (201) or update (200) by barcode
async fn upsert_product(
    State(state): State<Arc<AppState>>,
    ValidProduct(payload): ValidProduct,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let codigo = payload.codigo;
    let outcome = ProductRepo::new(&state.pool)
        .upsert(&codigo, payload.patch)
        .await?;

    let response = match outcome {
        UpsertOutcome::Updated => (
            StatusCode::OK,
            MessageResponse::new(format!("product {codigo} updated")),
        ),
        UpsertOutcome::Created => (
            StatusCode::CREATED,
            MessageResponse::new(format!("product {codigo} created")),
        ),
    };
    tracing::info!(codigo = %codigo, status = response.0.as_u16(), "product saved");

    Ok((response.0, Json(response.1)))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/product", post(upsert_product))
}
