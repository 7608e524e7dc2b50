//! Restaurant backend server
//!
//! Loads the configuration, connects to MongoDB and serves the restaurant
//! REST API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use restaurant::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    tracing::info!(
        database = %config.database.name,
        operation_timeout_secs = config.operation_timeout_secs,
        "starting restaurant server"
    );

    let database = connect(&config.database)
        .await
        .context("failed to connect to MongoDB")?;

    let stores = Stores::mongo(&database)
        .await
        .context("failed to prepare collections")?
        .with_timeout(config.operation_timeout());

    ServerBuilder::new()
        .with_stores(stores)
        .register_restaurant_entities()?
        .serve(&config.addr())
        .await
}
