//! Repository implementations for database access
//!
//! Repositories borrow the pool and run plain SQL with `$N` placeholders
//! that both supported backends understand.

pub mod products;

pub use products::{DbError, ProductRepo, UpsertOutcome};
