//! Per-store inventory documents.

use serde::{Deserialize, Serialize};

use super::{Document, DocumentKind, Schema};
use crate::{InventoryDocType, Timestamp};

/// Stock level of one product in one store.
///
/// Shares the retail container with [`RetailStore`](super::RetailStore);
/// `doc_type` always serializes as `"inventory"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailInventory {
    pub id: String,
    pub store_id: String,
    #[serde(default)]
    pub doc_type: InventoryDocType,
    pub product_id: String,
    pub product_code: String,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub maximum_stock: i32,
    pub last_restock_date: Option<Timestamp>,
    pub last_stock_check_date: Option<Timestamp>,
    pub updated_date: Timestamp,
}

impl RetailInventory {
    /// Whether stock has fallen to or below the minimum.
    #[must_use]
    pub const fn needs_restock(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }
}

impl Schema for RetailInventory {
    const NAME: &'static str = "RetailInventory";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "storeId",
        "docType",
        "productId",
        "productCode",
        "currentStock",
        "minimumStock",
        "maximumStock",
        "lastRestockDate",
        "lastStockCheckDate",
        "updatedDate",
    ];
}

impl Document for RetailInventory {
    const KIND: DocumentKind = DocumentKind::RetailInventory;
    const DEFAULT_CONTAINER: &'static str = "retail";

    fn id(&self) -> &str {
        &self.id
    }

    fn partition_key(&self) -> &str {
        &self.store_id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::documents::fixtures::{self, ts};
    use crate::documents::{from_json, from_value, to_json, to_value};

    #[test]
    fn test_doc_type_always_inventory() {
        let mut inventory = fixtures::inventory();
        inventory.product_code = "store".to_owned();
        let value = to_value(&inventory).unwrap();
        assert_eq!(value["docType"], json!("inventory"));
    }

    #[test]
    fn test_roundtrip_optionals_absent() {
        let inventory = fixtures::inventory();
        let parsed: RetailInventory = from_json(&to_json(&inventory).unwrap()).unwrap();
        assert_eq!(parsed, inventory);
    }

    #[test]
    fn test_roundtrip_optionals_present() {
        let mut inventory = fixtures::inventory();
        inventory.last_restock_date = Some(ts("2024-02-20T06:00:00Z"));
        inventory.last_stock_check_date = Some(ts("2024-02-28T17:45:30.125Z"));
        let parsed: RetailInventory = from_json(&to_json(&inventory).unwrap()).unwrap();
        assert_eq!(parsed, inventory);
    }

    #[test]
    fn test_stock_levels_are_integers() {
        let value = to_value(&fixtures::inventory()).unwrap();
        assert_eq!(value["currentStock"], json!(12));
        assert_eq!(value["minimumStock"], json!(5));
        assert_eq!(value["maximumStock"], json!(40));
    }

    #[test]
    fn test_fractional_stock_rejected() {
        let mut value = to_value(&fixtures::inventory()).unwrap();
        value["currentStock"] = json!(1.5);
        assert!(from_value::<RetailInventory>(value).is_err());
    }

    #[test]
    fn test_missing_updated_date_fails() {
        let mut value = to_value(&fixtures::inventory()).unwrap();
        value.as_object_mut().unwrap().remove("updatedDate");
        let err = from_value::<RetailInventory>(value).unwrap_err();
        assert!(err.to_string().contains("missing field `updatedDate`"));
    }

    #[test]
    fn test_wrong_doc_type_rejected() {
        let mut value = to_value(&fixtures::inventory()).unwrap();
        value["docType"] = json!("store");
        assert!(from_value::<RetailInventory>(value).is_err());
    }

    #[test]
    fn test_needs_restock() {
        let mut inventory = fixtures::inventory();
        assert!(!inventory.needs_restock());
        inventory.current_stock = 5;
        assert!(inventory.needs_restock());
    }

    #[test]
    fn test_partition_key_is_store_id() {
        let inventory = fixtures::inventory();
        assert_eq!(inventory.partition_key(), "S001");
        assert_eq!(inventory.id(), "inv-1");
    }
}
