//! pricecheck-server: product search and upsert over HTTP
//!
//! Storage lives in [`db`] (connection URL handling, pool, schema, sample
//! data, product repository); the axum router and handlers live in [`http`].

pub mod db;
pub mod http;

pub use db::{create_pool, DatabaseUrl, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig};
