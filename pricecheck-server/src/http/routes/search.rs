//! Product search endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use pricecheck_core::ProductView;
use serde::Deserialize;

use crate::db::ProductRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/search?q= - match by exact barcode or name substring
async fn search_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let query = params.q.as_deref().unwrap_or_default().trim().to_lowercase();
    if query.is_empty() {
        return Err(ApiError::validation("parameter 'q' is required"));
    }

    let products = ProductRepo::new(&state.pool).search(&query).await?;
    if products.is_empty() {
        return Err(ApiError::not_found("no products found"));
    }

    tracing::debug!(query = %query, matches = products.len(), "search");
    Ok(Json(products.iter().map(|p| p.view()).collect()))
}

/// Search routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/search", get(search_products))
}
