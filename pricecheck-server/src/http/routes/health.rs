//! Liveness plus a store check
//!
//! `/health` counts the product rows. A reachable store answers 200 with the
//! row count; a failing one answers 503 with the error so load balancers can
//! take the instance out of rotation.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::db::ProductRepo;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: StoreHealth,
}

#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (status, store) = match ProductRepo::new(&state.pool).count().await {
        Ok(products) => (
            StatusCode::OK,
            StoreHealth {
                connected: true,
                products: Some(products),
                error: None,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                StoreHealth {
                    connected: false,
                    products: None,
                    error: Some(e.to_string()),
                },
            )
        }
    };

    let body = HealthResponse {
        status: if store.connected { "ok" } else { "unavailable" },
        version: env!("CARGO_PKG_VERSION"),
        store,
    };
    (status, Json(body))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, schema, DatabaseUrl};

    async fn state(with_schema: bool) -> State<Arc<AppState>> {
        let url = DatabaseUrl::parse("sqlite::memory:").unwrap();
        let pool = create_pool(&url).await.unwrap();
        if with_schema {
            schema::initialize(&pool, url.backend()).await.unwrap();
        }
        State(Arc::new(AppState::new(pool)))
    }

    #[tokio::test]
    async fn reports_row_count() {
        let (status, Json(body)) = health(state(true).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert!(body.store.connected);
        assert_eq!(body.store.products, Some(0));
    }

    #[tokio::test]
    async fn missing_table_is_unavailable() {
        let (status, Json(body)) = health(state(false).await).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "unavailable");
        assert!(!body.store.connected);
        assert!(body.store.error.is_some());
    }
}
