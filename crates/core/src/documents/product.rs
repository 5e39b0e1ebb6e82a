//! Product catalog documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CategorySnapshot, Document, DocumentKind, Schema};
use crate::{Money, Timestamp};

/// A sellable product.
///
/// `specifications` is free-form JSON supplied by the source system. It is
/// stored and returned exactly as given: key order and numeric text are
/// preserved and nothing inside it is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub code: String,
    pub name: String,
    pub category: CategorySnapshot,
    pub r#type: String,
    pub description: Option<String>,
    /// Manufacturer's suggested retail price.
    pub msrp: Money,
    pub cost_price: Money,
    pub launch_date: Timestamp,
    pub size: String,
    pub color: String,
    pub specifications: Value,
    pub is_customizable: bool,
    /// Category id in the legacy source system. Kept for traceability only.
    pub source_category_id: Option<String>,
}

impl Schema for Product {
    const NAME: &'static str = "Product";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "code",
        "name",
        "category",
        "type",
        "description",
        "msrp",
        "costPrice",
        "launchDate",
        "size",
        "color",
        "specifications",
        "isCustomizable",
        "sourceCategoryId",
    ];
}

impl Document for Product {
    const KIND: DocumentKind = DocumentKind::Product;
    const DEFAULT_CONTAINER: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }
}
