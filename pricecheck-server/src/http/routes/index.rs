//! Root endpoint

use axum::{routing::get, Json, Router};

use super::MessageResponse;

pub const READY_MESSAGE: &str = "price comparison API ready";

/// GET /
async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new(READY_MESSAGE))
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
