//! Integration tests for Fabric Seed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fabric-seed-integration-tests
//! ```
//!
//! The tests under `tests/` check the document shapes as stored JSON text,
//! the way a downstream reader sees them. This library holds the sample
//! documents they share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::Value;

/// A product with every optional field populated and nested specifications.
pub const PRODUCT: &str = r#"{
  "id": "prod-1001",
  "code": "BK-M68B-42",
  "name": "Mountain-200 Black, 42",
  "category": { "id": "cat-5", "name": "Mountain Bikes", "type": "Bikes" },
  "type": "Bike",
  "description": "Lightweight aluminium frame",
  "msrp": 2294.99,
  "costPrice": 1251.9814,
  "launchDate": "2023-05-30T00:00:00Z",
  "size": "42",
  "color": "Black",
  "specifications": {
    "weightKg": 12.50,
    "frame": { "material": "Aluminium", "sizes": [38, 42, 46] },
    "warrantyYears": 2
  },
  "isCustomizable": false,
  "sourceCategoryId": "12"
}"#;

/// An order whose amounts and line totals are consistent.
pub const ORDER: &str = r#"{
  "id": "ord-5001",
  "customerId": "cust-29825",
  "orderNumber": "SO43659",
  "orderDate": "2024-02-01T12:30:00Z",
  "status": "Shipped",
  "payment": { "method": "CreditCard", "status": "Captured" },
  "shipping": {
    "address": "42 Market St, Springfield",
    "shipDate": "2024-02-03T09:00:00Z",
    "deliveryDate": null,
    "facilityId": "fac-7"
  },
  "billingAddress": "42 Market St, Springfield",
  "salesEmployeeId": null,
  "amounts": {
    "subTotal": 2059.97,
    "tax": 164.80,
    "shipping": 15.00,
    "discount": 100.00,
    "total": 2139.77
  },
  "lineItems": [
    {
      "productId": "prod-1001",
      "productCode": "BK-M68B-42",
      "name": "Mountain-200 Black, 42",
      "unitPrice": 2024.99,
      "quantity": 1,
      "lineTotal": 2024.99
    },
    {
      "productId": "prod-2002",
      "productCode": "BC-M005",
      "name": "Mountain Bottle Cage",
      "unitPrice": 9.99,
      "quantity": 2,
      "lineTotal": 19.98
    },
    {
      "productId": "prod-3003",
      "productCode": "WB-H098",
      "name": "Water Bottle",
      "unitPrice": 5.00,
      "quantity": 3,
      "lineTotal": 15.00
    }
  ]
}"#;

/// A store document for the shared retail container.
pub const STORE: &str = r#"{
  "id": "store-S001",
  "storeId": "S001",
  "docType": "store",
  "code": "NYC-01",
  "name": "New York Flagship",
  "type": "Flagship",
  "managerEmployeeId": "emp-17",
  "hours": { "open": "08:00", "close": "22:00" },
  "facilityId": "fac-7"
}"#;

/// An inventory document for the shared retail container.
pub const INVENTORY: &str = r#"{
  "id": "inv-S001-prod-1001",
  "storeId": "S001",
  "docType": "inventory",
  "productId": "prod-1001",
  "productCode": "BK-M68B-42",
  "currentStock": 4,
  "minimumStock": 5,
  "maximumStock": 30,
  "lastRestockDate": "2024-02-20T06:00:00Z",
  "lastStockCheckDate": null,
  "updatedDate": "2024-03-01T08:00:00Z"
}"#;

/// Parse a sample into a JSON value.
///
/// # Panics
///
/// Panics if the sample is not valid JSON.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn parse(sample: &str) -> Value {
    serde_json::from_str(sample).unwrap()
}

/// Keys of a JSON object, in document order.
///
/// # Panics
///
/// Panics if `value` is not an object.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect()
}
