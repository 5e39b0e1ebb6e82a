//! Fabric Seed CLI - Cosmos DB connection and document tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the resolved connection settings (key redacted)
//! fabric-seed config
//!
//! # Check that the configured database is reachable
//! fabric-seed ping --settings appsettings.Development.json
//!
//! # Check a file of orders without touching the database
//! fabric-seed validate --kind order data/orders.json
//!
//! # Validate, then upsert a file of products
//! fabric-seed upsert --kind product data/products.json
//! ```
//!
//! # Commands
//!
//! - `config` - Resolve and print configuration
//! - `ping` - Read the configured database
//! - `validate` - Decode and check documents offline
//! - `upsert` - Validate and write documents
//!
//! # Logging
//!
//! `RUST_LOG` selects levels (default `fabric_seed=info`). Set
//! `FABRIC_SEED_LOG_FORMAT=json` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;
mod cosmos;

use commands::KindArg;

#[derive(Parser)]
#[command(name = "fabric-seed")]
#[command(author, version, about = "Fabric Seed CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and print the connection settings
    Config {
        /// JSON settings file
        #[arg(short, long, default_value = config::DEFAULT_SETTINGS_FILE)]
        settings: PathBuf,
    },
    /// Read the configured database to check connectivity
    Ping {
        /// JSON settings file
        #[arg(short, long, default_value = config::DEFAULT_SETTINGS_FILE)]
        settings: PathBuf,
    },
    /// Decode and check documents without writing them
    Validate {
        /// Document kind in the file
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// JSON file holding one document or an array
        file: PathBuf,
    },
    /// Validate documents, then upsert them one at a time
    Upsert {
        /// Document kind in the file
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Target container (defaults to the kind's container)
        #[arg(short, long)]
        container: Option<String>,

        /// JSON settings file
        #[arg(short, long, default_value = config::DEFAULT_SETTINGS_FILE)]
        settings: PathBuf,

        /// JSON file holding one document or an array
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fabric_seed=info".into());
    let json = std::env::var("FABRIC_SEED_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Config { settings } => {
            commands::config::show(&settings)?;
        }
        Commands::Ping { settings } => {
            commands::ping::run(&settings).await?;
        }
        Commands::Validate { kind, file } => commands::validate::run(kind, &file)?,
        Commands::Upsert {
            kind,
            container,
            settings,
            file,
        } => {
            commands::upsert::run(&settings, kind, container, &file).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upsert() {
        let cli = Cli::try_parse_from([
            "fabric-seed",
            "upsert",
            "--kind",
            "retail",
            "--container",
            "retail-staging",
            "data/retail.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Upsert {
                kind,
                container,
                settings,
                file,
            } => {
                assert_eq!(kind, KindArg::Retail);
                assert_eq!(container.as_deref(), Some("retail-staging"));
                assert_eq!(settings, PathBuf::from("appsettings.json"));
                assert_eq!(file, PathBuf::from("data/retail.json"));
            }
            _ => panic!("expected upsert"),
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result = Cli::try_parse_from(["fabric-seed", "validate", "--kind", "customer", "x.json"]);
        assert!(result.is_err());
    }
}
