//! Mixed store/inventory documents read from the shared retail container.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RetailInventory, RetailStore};
use crate::{InventoryDocType, StoreDocType};

/// Either document kind found in the retail container, chosen by the
/// `docType` discriminator.
///
/// Serializes as the inner document unchanged. Deserializing requires
/// `docType` to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RetailDocument {
    Store(RetailStore),
    Inventory(RetailInventory),
}

impl RetailDocument {
    /// The document `id`.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Store(store) => &store.id,
            Self::Inventory(inventory) => &inventory.id,
        }
    }

    /// The shared partition key.
    #[must_use]
    pub fn store_id(&self) -> &str {
        match self {
            Self::Store(store) => &store.store_id,
            Self::Inventory(inventory) => &inventory.store_id,
        }
    }

    /// The discriminator literal.
    #[must_use]
    pub const fn doc_type(&self) -> &'static str {
        match self {
            Self::Store(_) => StoreDocType::VALUE,
            Self::Inventory(_) => InventoryDocType::VALUE,
        }
    }
}

impl From<RetailStore> for RetailDocument {
    fn from(store: RetailStore) -> Self {
        Self::Store(store)
    }
}

impl From<RetailInventory> for RetailDocument {
    fn from(inventory: RetailInventory) -> Self {
        Self::Inventory(inventory)
    }
}

impl<'de> Deserialize<'de> for RetailDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        const VARIANTS: &[&str] = &[StoreDocType::VALUE, InventoryDocType::VALUE];

        let value = Value::deserialize(deserializer)?;
        let doc_type = match value.get("docType") {
            Some(Value::String(doc_type)) => doc_type.clone(),
            Some(other) => {
                return Err(de::Error::invalid_type(
                    de::Unexpected::Other(&other.to_string()),
                    &"a docType string",
                ));
            }
            None => return Err(de::Error::missing_field("docType")),
        };

        match doc_type.as_str() {
            StoreDocType::VALUE => RetailStore::deserialize(value)
                .map(Self::Store)
                .map_err(de::Error::custom),
            InventoryDocType::VALUE => RetailInventory::deserialize(value)
                .map(Self::Inventory)
                .map_err(de::Error::custom),
            other => Err(de::Error::unknown_variant(other, VARIANTS)),
        }
    }
}
