//! Write documents from a file into a container.
//!
//! # Usage
//!
//! ```bash
//! # Upsert products into the default `products` container
//! fabric-seed upsert --kind product data/products.json
//!
//! # Upsert stores and inventory into a differently named container
//! fabric-seed upsert --kind retail --container retail-staging data/retail.json
//! ```
//!
//! Every document is decoded and validated before anything is written. If any
//! document fails, nothing is sent. Writes are sequential, one request per
//! document, and stop at the first rejected write.

use std::path::Path;

use fabric_seed_core::{
    Order, Product, RetailDocument, RetailInventory, RetailStore, Validate, ValidationIssue,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use super::KindArg;
use super::validate::{self, ValidateError};
use crate::config::{ConfigError, CosmosConfig};
use crate::cosmos::{ContainerClient, CosmosClient, CosmosError, UpsertOutcome, UpsertStatus};

/// Errors from the `upsert` command.
#[derive(Debug, Error)]
pub enum UpsertError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] ValidateError),

    #[error("{invalid} of {total} documents failed validation; nothing was written")]
    Rejected { invalid: usize, total: usize },

    #[error("Cosmos DB error: {0}")]
    Cosmos(#[from] CosmosError),

    #[error("Failed to write document {id}: {source}")]
    Write { id: String, source: CosmosError },
}

/// Counts from a completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct UpsertSummary {
    pub created: usize,
    pub replaced: usize,
    /// Total request units reported by the service.
    pub request_charge: f64,
}

/// A decoded document waiting to be written.
#[derive(Debug)]
enum Pending {
    Product(Product),
    Order(Order),
    Retail(RetailDocument),
}

impl Pending {
    fn decode(kind: KindArg, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            KindArg::Product => Self::Product(serde_json::from_value(value)?),
            KindArg::Order => Self::Order(serde_json::from_value(value)?),
            KindArg::Store => Self::Retail(serde_json::from_value::<RetailStore>(value)?.into()),
            KindArg::Inventory => {
                Self::Retail(serde_json::from_value::<RetailInventory>(value)?.into())
            }
            KindArg::Retail => Self::Retail(serde_json::from_value(value)?),
        })
    }

    fn id(&self) -> &str {
        match self {
            Self::Product(product) => &product.id,
            Self::Order(order) => &order.id,
            Self::Retail(doc) => doc.id(),
        }
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        match self {
            Self::Product(product) => product.validate(),
            Self::Order(order) => order.validate(),
            Self::Retail(doc) => doc.validate(),
        }
    }

    async fn upsert(&self, container: &ContainerClient) -> Result<UpsertOutcome, CosmosError> {
        match self {
            Self::Product(product) => container.upsert_item(product).await,
            Self::Order(order) => container.upsert_item(order).await,
            Self::Retail(RetailDocument::Store(store)) => container.upsert_item(store).await,
            Self::Retail(RetailDocument::Inventory(inventory)) => {
                container.upsert_item(inventory).await
            }
        }
    }
}

/// Validate every document in `path`, then upsert them one at a time.
///
/// # Errors
///
/// Returns error if configuration fails, the input cannot be read, any
/// document is malformed or inconsistent, or a write is rejected.
pub async fn run(
    settings: &Path,
    kind: KindArg,
    container: Option<String>,
    path: &Path,
) -> Result<UpsertSummary, UpsertError> {
    let config = CosmosConfig::load(settings)?;
    let pending = prepare(kind, validate::read_input(path)?)?;

    let client = CosmosClient::from_config(&config)?;
    let container_id = container.unwrap_or_else(|| kind.default_container().to_owned());
    let container = client
        .database(config.database.clone())
        .container(container_id);

    info!(
        database = %config.database,
        container = container.id(),
        count = pending.len(),
        "Writing documents"
    );

    let mut summary = UpsertSummary::default();
    for document in &pending {
        let outcome = document
            .upsert(&container)
            .await
            .map_err(|source| UpsertError::Write {
                id: document.id().to_owned(),
                source,
            })?;

        match outcome.status {
            UpsertStatus::Created => summary.created += 1,
            UpsertStatus::Replaced => summary.replaced += 1,
        }
        summary.request_charge += outcome.request_charge.unwrap_or_default();
    }

    info!(
        created = summary.created,
        replaced = summary.replaced,
        request_charge = summary.request_charge,
        "Upsert complete"
    );
    Ok(summary)
}

/// Decode and validate all documents, refusing the batch if any fails.
fn prepare(kind: KindArg, documents: Vec<Value>) -> Result<Vec<Pending>, UpsertError> {
    let total = documents.len();
    let mut pending = Vec::with_capacity(total);
    let mut invalid = 0;

    for (index, value) in documents.into_iter().enumerate() {
        match Pending::decode(kind, value) {
            Err(e) => {
                invalid += 1;
                error!(index, "Malformed document: {e}");
            }
            Ok(document) => {
                let issues = document.validate();
                if issues.is_empty() {
                    pending.push(document);
                } else {
                    invalid += 1;
                    for issue in &issues {
                        warn!(index, id = document.id(), "{issue}");
                    }
                }
            }
        }
    }

    if invalid > 0 {
        return Err(UpsertError::Rejected { invalid, total });
    }
    Ok(pending)
}
