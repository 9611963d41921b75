//! Standalone database initialization
//!
//! Creates the products table and loads the sample catalog without starting
//! the server. An existing SQLite file is left untouched unless `--force`.

use anyhow::{Context, Result};
use clap::Parser;

use pricecheck_server::db::{create_pool, schema, seed, DatabaseUrl, DEFAULT_DATABASE_URL};

#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (postgres://, postgresql:// or sqlite:)
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Initialize even if the SQLite file already exists (sample data is
    /// still only inserted into an empty table)
    #[arg(long, short)]
    pub force: bool,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let url = DatabaseUrl::parse(&args.database_url).context("Invalid DATABASE_URL")?;

    if let Some(path) = url.sqlite_path() {
        if path.exists() && !args.force {
            println!(
                "{} already exists. Delete it or pass --force to initialize anyway.",
                path.display()
            );
            return Ok(());
        }
    }

    let pool = create_pool(&url)
        .await
        .context("Failed to create database pool")?;

    schema::initialize(&pool, url.backend())
        .await
        .context("Failed to create products table")?;

    let inserted = seed::seed_if_empty(&pool)
        .await
        .context("Failed to insert sample products")?;

    pool.close().await;

    if inserted > 0 {
        println!("Database ready: {} sample products inserted", inserted);
    } else {
        println!("Database ready: products table already populated");
    }
    Ok(())
}
