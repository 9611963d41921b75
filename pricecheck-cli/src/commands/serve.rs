//! HTTP server command
//!
//! Prepares the store (schema, optional sample data) and runs the API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use pricecheck_server::db::{
    create_pool_with_options, schema, seed, DatabaseUrl, DEFAULT_DATABASE_URL,
};
use pricecheck_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use pricecheck_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "PRICECHECK_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Database URL (postgres://, postgresql:// or sqlite:)
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Do not insert sample products into an empty store
    #[arg(long)]
    pub no_seed: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let url = DatabaseUrl::parse(&args.database_url).context("Invalid DATABASE_URL")?;
    tracing::info!(backend = ?url.backend(), "Connecting to database");

    let pool = create_pool_with_options(&url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    schema::initialize(&pool, url.backend())
        .await
        .context("Failed to create products table")?;

    if !args.no_seed {
        seed::seed_if_empty(&pool)
            .await
            .context("Failed to insert sample products")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    tracing::info!("Starting pricecheck server on {}", args.bind);
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
