//! Cosmos DB connection settings.
//!
//! # Sources
//!
//! Values are merged from, in increasing priority:
//! 1. An optional JSON settings file (default `appsettings.json`)
//! 2. Environment variables, including a `.env` file if present
//!
//! ## Settings file
//! ```json
//! { "CosmosDb": { "Endpoint": "...", "PrimaryKey": "...", "Database": "..." } }
//! ```
//!
//! ## Environment Variables
//! - `COSMOSDB__ENDPOINT` - Account endpoint URI
//! - `COSMOSDB__PRIMARYKEY` - Account master key (base64)
//! - `COSMOSDB__DATABASE` - Target database id

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Default settings file, resolved against the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

const ENDPOINT_VAR: &str = "COSMOSDB__ENDPOINT";
const PRIMARY_KEY_VAR: &str = "COSMOSDB__PRIMARYKEY";
const DATABASE_VAR: &str = "COSMOSDB__DATABASE";

/// Decoded length of the shortest key accepted.
const MIN_KEY_BYTES: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "<",
    "{{",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing setting {0} (set it in the settings file or via environment)")]
    Missing(&'static str),
    #[error("Invalid setting {0}: {1}")]
    Invalid(&'static str, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(&'static str, String),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Resolved Cosmos DB connection settings.
///
/// Implements `Debug` manually to redact the key.
#[derive(Clone)]
pub struct CosmosConfig {
    /// Account endpoint, always ending in `/`
    pub endpoint: Url,
    /// Account master key (base64)
    pub primary_key: SecretString,
    /// Target database id
    pub database: String,
}

impl std::fmt::Debug for CosmosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("primary_key", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// Shape of the settings file. Unrelated sections are ignored.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(rename = "CosmosDb", default)]
    cosmos_db: CosmosDbSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CosmosDbSection {
    endpoint: Option<String>,
    primary_key: Option<String>,
    database: Option<String>,
}

impl CosmosConfig {
    /// Load configuration from the settings file and environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. A
    /// missing settings file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the settings file cannot be read or parsed,
    /// or if a value is missing or invalid.
    pub fn load(settings_path: &Path) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let file = read_settings_file(settings_path)?;
        Self::resolve(file.cosmos_db, |key| std::env::var(key).ok())
    }

    /// Merge file values with environment lookups, environment winning.
    fn resolve(
        file: CosmosDbSection,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_blank = |v: String| {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_owned())
        };
        let pick = |var: &str, from_file: Option<String>| {
            env(var)
                .and_then(non_blank)
                .or_else(|| from_file.and_then(non_blank))
        };

        let endpoint = pick(ENDPOINT_VAR, file.endpoint).ok_or(ConfigError::Missing("CosmosDb:Endpoint"))?;
        let primary_key =
            pick(PRIMARY_KEY_VAR, file.primary_key).ok_or(ConfigError::Missing("CosmosDb:PrimaryKey"))?;
        let database = pick(DATABASE_VAR, file.database).ok_or(ConfigError::Missing("CosmosDb:Database"))?;

        let endpoint = parse_endpoint(&endpoint)?;
        let primary_key = SecretString::from(primary_key);
        validate_primary_key(&primary_key)?;

        Ok(Self {
            endpoint,
            primary_key,
            database,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read the settings file, treating a missing file as empty.
fn read_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using environment only");
            return Ok(SettingsFile::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };

    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Parse the endpoint and make sure it joins as a directory.
fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::Invalid("CosmosDb:Endpoint", e.to_string()))?;

    if !matches!(url.scheme(), "https" | "http") {
        return Err(ConfigError::Invalid(
            "CosmosDb:Endpoint",
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Reject placeholder values and keys that are not real base64 master keys.
fn validate_primary_key(key: &SecretString) -> Result<(), ConfigError> {
    let value = key.expose_secret();
    let lower = value.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                "CosmosDb:PrimaryKey",
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let decoded = STANDARD.decode(value).map_err(|e| {
        ConfigError::Invalid("CosmosDb:PrimaryKey", format!("not valid base64: {e}"))
    })?;

    if decoded.len() < MIN_KEY_BYTES {
        return Err(ConfigError::InsecureSecret(
            "CosmosDb:PrimaryKey",
            format!(
                "must decode to at least {MIN_KEY_BYTES} bytes (got {})",
                decoded.len()
            ),
        ));
    }

    Ok(())
}
