//! Database connection pool management
//!
//! Uses the sqlx `Any` driver so one pool type serves both SQLite and
//! PostgreSQL, with explicit connection limits.

use std::sync::Once;

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;

use super::url::DatabaseUrl;

/// Default maximum connections for the pool.
/// Kept low; each request holds a connection only for one query.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

static DRIVERS: Once = Once::new();

/// Create a connection pool for `url`.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let url = DatabaseUrl::parse("sqlite://products.db")?;
/// let pool = create_pool(&url).await?;
/// ```
pub async fn create_pool(url: &DatabaseUrl) -> Result<AnyPool, sqlx::Error> {
    create_pool_with_options(url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a connection pool with custom options.
///
/// An in-memory SQLite database exists per connection, so such pools are
/// pinned to a single connection that is never recycled.
pub async fn create_pool_with_options(
    url: &DatabaseUrl,
    max_connections: u32,
) -> Result<AnyPool, sqlx::Error> {
    DRIVERS.call_once(install_default_drivers);

    let options = if url.is_memory() {
        AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        AnyPoolOptions::new().max_connections(max_connections.max(1))
    };

    tracing::debug!(backend = ?url.backend(), max_connections, "opening connection pool");
    options.connect(url.as_str()).await
}
