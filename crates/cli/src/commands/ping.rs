//! Connectivity check against the configured database.
//!
//! ```bash
//! fabric-seed ping
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, CosmosConfig};
use crate::cosmos::{CosmosClient, CosmosError, DatabaseProperties};

/// Errors from the `ping` command.
#[derive(Debug, Error)]
pub enum PingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cosmos DB error: {0}")]
    Cosmos(#[from] CosmosError),
}

/// Read the configured database and log its properties.
///
/// # Errors
///
/// Returns error if configuration fails or the database cannot be read.
pub async fn run(settings: &Path) -> Result<DatabaseProperties, PingError> {
    let config = CosmosConfig::load(settings)?;
    let client = CosmosClient::from_config(&config)?;

    let database = client.database(config.database.clone());

    info!(endpoint = %client.endpoint(), database = database.id(), "Reading database");
    let properties = database.read().await?;

    info!(
        id = %properties.id,
        rid = properties.rid.as_deref().unwrap_or("-"),
        last_modified = ?properties.ts,
        "Database reachable"
    );
    Ok(properties)
}
