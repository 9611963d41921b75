//! Database URL normalization
//!
//! `DATABASE_URL` may come from a hosting provider that still hands out the
//! legacy `postgres://` scheme, or from tooling that writes a driver-qualified
//! `postgresql+<driver>://` scheme. Both are rewritten to `postgresql://`
//! before use. SQLite URLs are pointed at a file that is created on first
//! connect unless the caller already chose a `mode`.

use std::path::PathBuf;

use super::repos::DbError;

/// Store used when `DATABASE_URL` is unset: a single file in the working directory
pub const DEFAULT_DATABASE_URL: &str = "sqlite://products.db";

const LEGACY_POSTGRES_SCHEME: &str = "postgres://";
const POSTGRES_SCHEME: &str = "postgresql://";

/// Relational engine behind a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

/// A normalized connection string plus the backend it selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseUrl {
    url: String,
    backend: Backend,
}

impl DatabaseUrl {
    /// Parse and normalize a raw connection string.
    ///
    /// # Example
    /// ```
    /// use pricecheck_server::db::{Backend, DatabaseUrl};
    ///
    /// let url = DatabaseUrl::parse("postgres://u:p@db:5432/prices").unwrap();
    /// assert_eq!(url.as_str(), "postgresql://u:p@db:5432/prices");
    /// assert_eq!(url.backend(), Backend::Postgres);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DbError> {
        let raw = raw.trim();

        if let Some(rest) = raw.strip_prefix(LEGACY_POSTGRES_SCHEME) {
            return Ok(Self::postgres(rest));
        }
        if let Some(rest) = raw.strip_prefix(POSTGRES_SCHEME) {
            return Ok(Self::postgres(rest));
        }
        if let Some((scheme, rest)) = raw.split_once("://") {
            if scheme.starts_with("postgresql+") {
                return Ok(Self::postgres(rest));
            }
        }

        if raw.starts_with("sqlite:") {
            return Ok(Self {
                url: sqlite_create_if_missing(raw),
                backend: Backend::Sqlite,
            });
        }

        Err(DbError::UnsupportedUrl {
            scheme: raw.split(':').next().unwrap_or_default().to_owned(),
        })
    }

    fn postgres(rest: &str) -> Self {
        Self {
            url: format!("{POSTGRES_SCHEME}{rest}"),
            backend: Backend::Postgres,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// True for `sqlite::memory:` style URLs, which live only as long as a connection
    pub fn is_memory(&self) -> bool {
        self.backend == Backend::Sqlite && self.url.contains(":memory:")
    }

    /// Path of the SQLite database file, if this URL names one
    pub fn sqlite_path(&self) -> Option<PathBuf> {
        if self.backend != Backend::Sqlite || self.is_memory() {
            return None;
        }
        let rest = self.url.strip_prefix("sqlite:")?;
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        let path = rest.split('?').next().unwrap_or(rest);
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

/// Append `mode=rwc` so the SQLite file is created on first connect
fn sqlite_create_if_missing(url: &str) -> String {
    if url.contains(":memory:") || url.contains("mode=") {
        return url.to_owned();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}mode=rwc")
}
