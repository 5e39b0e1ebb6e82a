//! Document shapes persisted to the Cosmos DB containers.
//!
//! Every record here is a plain value type. The serialized key of each field
//! is derived from its Rust name by a single `rename_all = "camelCase"` on
//! the struct, and each record publishes the resulting key list in
//! [`Schema::FIELDS`]. The tests in this module serialize every record and
//! compare its keys against that table, so the table is the reviewable
//! contract for downstream readers.
//!
//! Absent optional fields are written as JSON `null`. Unknown keys are
//! ignored on input.

pub mod category;
pub mod inventory;
pub mod order;
pub mod product;
pub mod retail;
pub mod store;

pub use category::CategorySnapshot;
pub use inventory::RetailInventory;
pub use order::{Amounts, Order, OrderLineItem, PaymentInfo, ShippingInfo};
pub use product::Product;
pub use retail::RetailDocument;
pub use store::{RetailStore, StoreHours};

use core::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while encoding or decoding a record.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Input was not valid JSON, lacked a required key, or had a value of the
    /// wrong shape.
    #[error("invalid {schema} document: {source}")]
    Deserialize {
        /// Name of the record type being decoded.
        schema: &'static str,
        /// Underlying decoder error, including the offending key.
        source: serde_json::Error,
    },

    /// A record could not be encoded.
    #[error("failed to serialize {schema}: {source}")]
    Serialize {
        /// Name of the record type being encoded.
        schema: &'static str,
        /// Underlying encoder error.
        source: serde_json::Error,
    },

    /// A document kind name did not match any known kind.
    #[error("unknown document kind: {0}")]
    UnknownKind(String),
}

/// A record with a fixed, published set of serialized keys.
pub trait Schema: Serialize + DeserializeOwned {
    /// Human-readable record name used in errors and logs.
    const NAME: &'static str;

    /// Serialized keys, in the order they are written.
    const FIELDS: &'static [&'static str];
}

/// A top-level record stored as its own document.
pub trait Document: Schema {
    /// Which kind of document this is.
    const KIND: DocumentKind;

    /// Container the document is written to unless configured otherwise.
    const DEFAULT_CONTAINER: &'static str;

    /// The document `id`.
    fn id(&self) -> &str;

    /// Value of the container's partition key for this document.
    ///
    /// Defaults to the document `id`.
    fn partition_key(&self) -> &str {
        self.id()
    }
}

/// The kinds of top-level documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Product,
    Order,
    RetailStore,
    RetailInventory,
}

impl DocumentKind {
    /// All document kinds.
    pub const ALL: [Self; 4] = [
        Self::Product,
        Self::Order,
        Self::RetailStore,
        Self::RetailInventory,
    ];

    /// Short name used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Order => "order",
            Self::RetailStore => "store",
            Self::RetailInventory => "inventory",
        }
    }

    /// Container this kind is written to by default.
    #[must_use]
    pub const fn default_container(&self) -> &'static str {
        match self {
            Self::Product => Product::DEFAULT_CONTAINER,
            Self::Order => Order::DEFAULT_CONTAINER,
            Self::RetailStore => RetailStore::DEFAULT_CONTAINER,
            Self::RetailInventory => RetailInventory::DEFAULT_CONTAINER,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SchemaError::UnknownKind(s.to_owned()))
    }
}

/// Serialize a record to compact JSON.
///
/// # Errors
///
/// Returns [`SchemaError::Serialize`] if encoding fails.
pub fn to_json<T: Schema>(record: &T) -> Result<String, SchemaError> {
    serde_json::to_string(record).map_err(|source| SchemaError::Serialize {
        schema: T::NAME,
        source,
    })
}

/// Serialize a record to indented JSON.
///
/// # Errors
///
/// Returns [`SchemaError::Serialize`] if encoding fails.
pub fn to_json_pretty<T: Schema>(record: &T) -> Result<String, SchemaError> {
    serde_json::to_string_pretty(record).map_err(|source| SchemaError::Serialize {
        schema: T::NAME,
        source,
    })
}

/// Serialize a record to a JSON value tree.
///
/// # Errors
///
/// Returns [`SchemaError::Serialize`] if encoding fails.
pub fn to_value<T: Schema>(record: &T) -> Result<Value, SchemaError> {
    serde_json::to_value(record).map_err(|source| SchemaError::Serialize {
        schema: T::NAME,
        source,
    })
}

/// Deserialize a record from JSON text.
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] if a required key is missing or a
/// value has the wrong shape.
pub fn from_json<T: Schema>(json: &str) -> Result<T, SchemaError> {
    serde_json::from_str(json).map_err(|source| SchemaError::Deserialize {
        schema: T::NAME,
        source,
    })
}

/// Deserialize a record from a JSON value tree.
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] if a required key is missing or a
/// value has the wrong shape.
pub fn from_value<T: Schema>(value: Value) -> Result<T, SchemaError> {
    serde_json::from_value(value).map_err(|source| SchemaError::Deserialize {
        schema: T::NAME,
        source,
    })
}

/// Shared fixtures for the per-record test modules.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    use super::*;
    use crate::{Money, Timestamp};

    pub fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    pub fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    pub fn category() -> CategorySnapshot {
        CategorySnapshot {
            id: "cat-bikes".to_owned(),
            name: "Mountain Bikes".to_owned(),
            r#type: "Bikes".to_owned(),
        }
    }

    pub fn product() -> Product {
        Product {
            id: "prod-1".to_owned(),
            code: "SKU-1".to_owned(),
            name: "Widget".to_owned(),
            category: category(),
            r#type: "Accessory".to_owned(),
            description: None,
            msrp: money("19.99"),
            cost_price: money("7.25"),
            launch_date: ts("2024-01-15T00:00:00Z"),
            size: "M".to_owned(),
            color: "Red".to_owned(),
            specifications: json!({ "battery": { "capacityMah": 4000, "removable": false } }),
            is_customizable: true,
            source_category_id: None,
        }
    }

    pub fn order() -> Order {
        Order {
            id: "ord-1".to_owned(),
            customer_id: "cust-9".to_owned(),
            order_number: "SO-1001".to_owned(),
            order_date: ts("2024-02-01T12:00:00Z"),
            status: "Pending".to_owned(),
            payment: PaymentInfo {
                method: "Card".to_owned(),
                status: "Authorized".to_owned(),
            },
            shipping: ShippingInfo::default(),
            billing_address: None,
            sales_employee_id: None,
            amounts: Amounts {
                sub_total: money("39.98"),
                tax: money("3.20"),
                shipping: money("5.00"),
                discount: money("2.00"),
                total: money("46.18"),
            },
            line_items: vec![OrderLineItem {
                product_id: "prod-1".to_owned(),
                product_code: "SKU-1".to_owned(),
                name: "Widget".to_owned(),
                unit_price: money("19.99"),
                quantity: 2,
                line_total: money("39.98"),
            }],
        }
    }

    pub fn store() -> RetailStore {
        RetailStore::new("store-1", "S001", "STO-NYC", "New York Flagship", "Flagship")
    }

    pub fn inventory() -> RetailInventory {
        RetailInventory {
            id: "inv-1".to_owned(),
            store_id: "S001".to_owned(),
            doc_type: crate::InventoryDocType,
            product_id: "prod-1".to_owned(),
            product_code: "SKU-1".to_owned(),
            current_stock: 12,
            minimum_stock: 5,
            maximum_stock: 40,
            last_restock_date: None,
            last_stock_check_date: None,
            updated_date: ts("2024-03-01T08:00:00Z"),
        }
    }

    /// Keys of a serialized object, in output order.
    pub fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }
}
