//! Show the resolved connection settings.
//!
//! ```bash
//! fabric-seed config --settings appsettings.Development.json
//! ```

use std::path::Path;

use tracing::info;

use crate::config::{ConfigError, CosmosConfig};

/// Resolve and log the configuration. The key is never printed.
///
/// # Errors
///
/// Returns error if a setting is missing or invalid.
pub fn show(settings: &Path) -> Result<CosmosConfig, ConfigError> {
    let config = CosmosConfig::load(settings)?;
    info!(
        endpoint = %config.endpoint,
        database = %config.database,
        primary_key = "[REDACTED]",
        "Configuration resolved"
    );
    Ok(config)
}
