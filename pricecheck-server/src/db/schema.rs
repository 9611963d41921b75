//! Products table creation

use sqlx::AnyPool;

use super::repos::DbError;
use super::url::Backend;

const SQLITE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        codigo TEXT NOT NULL UNIQUE,
        nombre TEXT NOT NULL,
        nombre_lower TEXT NOT NULL,
        precio_walmart REAL NOT NULL,
        precio_chedraui REAL NOT NULL,
        precio_soriana REAL NOT NULL,
        predicted_price_next_year REAL
    )
"#;

const POSTGRES_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        codigo TEXT NOT NULL UNIQUE,
        nombre TEXT NOT NULL,
        nombre_lower TEXT NOT NULL,
        precio_walmart DOUBLE PRECISION NOT NULL,
        precio_chedraui DOUBLE PRECISION NOT NULL,
        precio_soriana DOUBLE PRECISION NOT NULL,
        predicted_price_next_year DOUBLE PRECISION
    )
"#;

/// Create the products table if it does not exist yet.
///
/// `nombre_lower` holds the case-folded name that search matches on.
/// Idempotent. Callers treat an error here as fatal.
pub async fn initialize(pool: &AnyPool, backend: Backend) -> Result<(), DbError> {
    let ddl = match backend {
        Backend::Sqlite => SQLITE_PRODUCTS,
        Backend::Postgres => POSTGRES_PRODUCTS,
    };

    sqlx::query(ddl).execute(pool).await?;
    tracing::info!(?backend, "products table ready");
    Ok(())
}
