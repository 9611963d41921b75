//! Database layer - connection URL, pool, schema, seed data and repositories
//!
//! # Design Principles
//!
//! - One `AnyPool` built at startup and passed explicitly; no global engine
//! - The same queries run on SQLite and PostgreSQL (`$N` placeholders)
//! - Uniqueness of `codigo` is enforced by the table, not by the application
//! - Upserts are single statements; only seeding runs in a transaction

pub mod pool;
pub mod repos;
pub mod schema;
pub mod seed;
pub mod url;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use url::{Backend, DatabaseUrl, DEFAULT_DATABASE_URL};
