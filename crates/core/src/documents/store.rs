//! Retail store documents.

use serde::{Deserialize, Serialize};

use super::{Document, DocumentKind, Schema};
use crate::StoreDocType;

/// A physical retail store.
///
/// Stores share a container with [`RetailInventory`](super::RetailInventory)
/// documents, partitioned by `store_id` and told apart by `doc_type`, which
/// always serializes as `"store"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailStore {
    pub id: String,
    /// Partition key shared with the store's inventory documents.
    pub store_id: String,
    // Missing on input is tolerated since the value is fixed; any other
    // literal is rejected.
    #[serde(default)]
    pub doc_type: StoreDocType,
    pub code: String,
    pub name: String,
    pub r#type: String,
    pub manager_employee_id: Option<String>,
    #[serde(default)]
    pub hours: StoreHours,
    pub facility_id: Option<String>,
}

impl RetailStore {
    /// Create a store with default opening hours and no manager or facility.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        store_id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        store_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            store_id: store_id.into(),
            doc_type: StoreDocType,
            code: code.into(),
            name: name.into(),
            r#type: store_type.into(),
            manager_employee_id: None,
            hours: StoreHours::default(),
            facility_id: None,
        }
    }
}

/// Daily opening hours as `HH:MM` local time.
///
/// Defaults to `09:00`-`21:00`. The defaults are applied when a store is
/// constructed or when keys are missing on input, and are always written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreHours {
    pub open: String,
    pub close: String,
}

impl StoreHours {
    /// Default opening time.
    pub const DEFAULT_OPEN: &'static str = "09:00";
    /// Default closing time.
    pub const DEFAULT_CLOSE: &'static str = "21:00";
}

impl Default for StoreHours {
    fn default() -> Self {
        Self {
            open: Self::DEFAULT_OPEN.to_owned(),
            close: Self::DEFAULT_CLOSE.to_owned(),
        }
    }
}

impl Schema for RetailStore {
    const NAME: &'static str = "RetailStore";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "storeId",
        "docType",
        "code",
        "name",
        "type",
        "managerEmployeeId",
        "hours",
        "facilityId",
    ];
}

impl Schema for StoreHours {
    const NAME: &'static str = "StoreHours";
    const FIELDS: &'static [&'static str] = &["open", "close"];
}

impl Document for RetailStore {
    const KIND: DocumentKind = DocumentKind::RetailStore;
    const DEFAULT_CONTAINER: &'static str = "retail";

    fn id(&self) -> &str {
        &self.id
    }

    fn partition_key(&self) -> &str {
        &self.store_id
    }
}
