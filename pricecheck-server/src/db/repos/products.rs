//! Product repository
//!
//! - search: exact barcode OR case-insensitive name substring
//! - upsert: single-statement UPDATE, then a conflict-tolerant INSERT
//! - insert/count: used by the sample-data seeder
//!
//! Names are stored twice: as given, and folded with Rust's Unicode
//! lowercasing in `nombre_lower`. Search matches against the folded copy so
//! accented capitals behave the same on every backend.

use pricecheck_core::{Barcode, CoreError, NewProduct, Product, ProductPatch};
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, AnyPool, Row};

const PRODUCT_COLUMNS: &str = "id, codigo, nombre, precio_walmart, precio_chedraui, \
                               precio_soriana, predicted_price_next_year";

const INSERT_PRODUCT: &str = r#"
    INSERT INTO products
        (codigo, nombre, nombre_lower, precio_walmart, precio_chedraui, precio_soriana,
         predicted_price_next_year)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
"#;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unsupported database URL scheme '{scheme}'")]
    UnsupportedUrl { scheme: String },

    /// The stored operation was rejected before reaching the database
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Which branch an upsert took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a AnyPool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a AnyPool) -> Self {
        Self { pool }
    }

    /// Find products whose barcode equals `query` or whose name contains it.
    ///
    /// The name match ignores case (Unicode lowercasing); LIKE wildcards in
    /// `query` match literally.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, DbError> {
        let pattern = format!("%{}%", escape_like(&fold_name(query)));
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE codigo = $1 OR nombre_lower LIKE $2 ESCAPE '\\' \
             ORDER BY id"
        );

        let rows = sqlx::query(&sql)
            .bind(query)
            .bind(pattern)
            .fetch_all(self.pool)
            .await?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<_, _>>()
            .map_err(DbError::from)
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get("total")?)
    }

    /// Insert a new product. A duplicate barcode fails on the UNIQUE constraint.
    pub async fn insert(&self, product: &NewProduct) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        insert_product(&mut conn, product).await
    }

    /// Create or update the product keyed by `codigo`.
    ///
    /// Every step is a single autocommit statement, so concurrent writers
    /// only ever wait on the store's write lock. An existing row gets only
    /// the fields present in `patch`; a new row needs a complete record (see
    /// [`ProductPatch::into_new`]). A create that loses the race for its
    /// barcode falls back to the update.
    pub async fn upsert(
        &self,
        codigo: &Barcode,
        patch: ProductPatch,
    ) -> Result<UpsertOutcome, DbError> {
        let outcome = if self.update_fields(codigo, &patch).await? {
            UpsertOutcome::Updated
        } else {
            let new = patch.clone().into_new(codigo.clone())?;
            let sql = format!("{INSERT_PRODUCT} ON CONFLICT (codigo) DO NOTHING");
            let inserted = bind_new_product(&sql, &new)
                .execute(self.pool)
                .await?
                .rows_affected();

            if inserted > 0 {
                UpsertOutcome::Created
            } else {
                tracing::debug!(codigo = %codigo, "created concurrently, applying as update");
                self.update_fields(codigo, &patch).await?;
                UpsertOutcome::Updated
            }
        };

        tracing::debug!(codigo = %codigo, ?outcome, "product upserted");
        Ok(outcome)
    }

    /// Overwrite the columns present in `patch`. Returns whether a row matched.
    async fn update_fields(
        &self,
        codigo: &Barcode,
        patch: &ProductPatch,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET nombre = COALESCE($1, nombre),
                nombre_lower = COALESCE($2, nombre_lower),
                precio_walmart = COALESCE($3, precio_walmart),
                precio_chedraui = COALESCE($4, precio_chedraui),
                precio_soriana = COALESCE($5, precio_soriana),
                predicted_price_next_year = COALESCE($6, predicted_price_next_year)
            WHERE codigo = $7
            "#,
        )
        .bind(patch.nombre.clone())
        .bind(patch.nombre.as_deref().map(fold_name))
        .bind(patch.precio_walmart)
        .bind(patch.precio_chedraui)
        .bind(patch.precio_soriana)
        .bind(patch.predicted_price_next_year)
        .bind(codigo.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) async fn insert_product(
    conn: &mut sqlx::AnyConnection,
    product: &NewProduct,
) -> Result<(), DbError> {
    bind_new_product(INSERT_PRODUCT, product).execute(conn).await?;
    Ok(())
}

fn bind_new_product<'q>(
    sql: &'q str,
    product: &'q NewProduct,
) -> Query<'q, Any, AnyArguments<'q>> {
    sqlx::query(sql)
        .bind(product.codigo.as_str())
        .bind(product.nombre.as_str())
        .bind(fold_name(&product.nombre))
        .bind(product.precio_walmart)
        .bind(product.precio_chedraui)
        .bind(product.precio_soriana)
        .bind(product.predicted_price_next_year)
}

fn product_from_row(row: &AnyRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        codigo: row.try_get("codigo")?,
        nombre: row.try_get("nombre")?,
        precio_walmart: row.try_get("precio_walmart")?,
        precio_chedraui: row.try_get("precio_chedraui")?,
        precio_soriana: row.try_get("precio_soriana")?,
        predicted_price_next_year: row.try_get("predicted_price_next_year")?,
    })
}

/// Case-folded name used for matching
fn fold_name(nombre: &str) -> String {
    nombre.to_lowercase()
}

/// Escape LIKE metacharacters so they match literally under `ESCAPE '\'`
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
