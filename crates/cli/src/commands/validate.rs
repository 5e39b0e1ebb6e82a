//! Offline validation of document files.
//!
//! # Usage
//!
//! ```bash
//! # Check a single product document
//! fabric-seed validate --kind product data/product.json
//!
//! # Check an array of mixed store/inventory documents
//! fabric-seed validate --kind retail data/retail.json
//! ```
//!
//! Each document is decoded with the storage schema and then checked with the
//! cross-field rules. Nothing is sent to the database.

use std::path::Path;

use fabric_seed_core::{Order, Product, RetailDocument, RetailInventory, RetailStore, Validate};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use super::KindArg;

/// Errors that stop validation before any document is checked, or report
/// that some documents failed.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("{invalid} of {total} documents failed validation")]
    Failed { invalid: usize, total: usize },
}

/// Outcome for one document in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentReport {
    /// Decoded and passed every rule.
    Valid,
    /// Could not be decoded.
    Malformed(String),
    /// Decoded, but broke one or more rules.
    Inconsistent(Vec<String>),
}

impl DocumentReport {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Validate a file and log every problem found.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed as JSON, or if any
/// document fails.
pub fn run(kind: KindArg, path: &Path) -> Result<(), ValidateError> {
    let documents = read_input(path)?;
    let reports = check_all(kind, documents);
    let total = reports.len();
    let invalid = reports.iter().filter(|(_, report)| !report.is_valid()).count();

    for (index, (id, report)) in reports.iter().enumerate() {
        let id = id.as_deref().unwrap_or("<no id>");
        match report {
            DocumentReport::Valid => {}
            DocumentReport::Malformed(reason) => error!(index, id, "Malformed document: {reason}"),
            DocumentReport::Inconsistent(issues) => {
                for issue in issues {
                    warn!(index, id, "{issue}");
                }
            }
        }
    }

    info!(path = %path.display(), ?kind, total, invalid, "Validation finished");

    if invalid > 0 {
        return Err(ValidateError::Failed { invalid, total });
    }
    Ok(())
}

/// Read a JSON file holding one document or an array of documents.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not JSON.
pub fn read_input(path: &Path) -> Result<Vec<Value>, ValidateError> {
    let display = || path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| ValidateError::Read {
        path: display(),
        source,
    })?;
    let input: Value = serde_json::from_str(&text).map_err(|source| ValidateError::Json {
        path: display(),
        source,
    })?;

    Ok(match input {
        Value::Array(items) => items,
        single => vec![single],
    })
}

/// Check every document.
///
/// Returns each document's `id`, when it has one, alongside its report.
#[must_use]
pub fn check_all(kind: KindArg, documents: Vec<Value>) -> Vec<(Option<String>, DocumentReport)> {
    documents
        .into_iter()
        .map(|value| {
            let id = value.get("id").and_then(Value::as_str).map(str::to_owned);
            (id, check_one(kind, value))
        })
        .collect()
}

fn check_one(kind: KindArg, value: Value) -> DocumentReport {
    match kind {
        KindArg::Product => check::<Product>(value),
        KindArg::Order => check::<Order>(value),
        KindArg::Store => check::<RetailStore>(value),
        KindArg::Inventory => check::<RetailInventory>(value),
        KindArg::Retail => check::<RetailDocument>(value),
    }
}

fn check<T: DeserializeOwned + Validate>(value: Value) -> DocumentReport {
    match serde_json::from_value::<T>(value) {
        Err(e) => DocumentReport::Malformed(e.to_string()),
        Ok(document) => {
            let issues = document.validate();
            if issues.is_empty() {
                DocumentReport::Valid
            } else {
                DocumentReport::Inconsistent(issues.iter().map(ToString::to_string).collect())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;
    use crate::commands::fixtures::{inventory, store};

    #[test]
    fn test_single_valid_document() {
        let reports = check_all(KindArg::Inventory, vec![inventory("inv-1", 5, 40)]);
        assert_eq!(reports, vec![(Some("inv-1".to_owned()), DocumentReport::Valid)]);
    }

    #[test]
    fn test_array_with_inconsistent_document() {
        let input = vec![inventory("inv-1", 5, 40), inventory("inv-2", 50, 40)];
        let reports = check_all(KindArg::Inventory, input);
        assert!(reports[0].1.is_valid());
        assert!(matches!(&reports[1].1, DocumentReport::Inconsistent(issues) if issues.len() == 1));
    }

    #[test]
    fn test_malformed_document() {
        let mut doc = inventory("inv-1", 5, 40);
        doc.as_object_mut().unwrap().remove("productId");
        let reports = check_all(KindArg::Inventory, vec![doc]);
        assert!(
            matches!(&reports[0].1, DocumentReport::Malformed(reason) if reason.contains("productId"))
        );
    }

    #[test]
    fn test_wrong_kind_is_malformed() {
        let reports = check_all(KindArg::Store, vec![inventory("inv-1", 5, 40)]);
        assert!(matches!(reports[0].1, DocumentReport::Malformed(_)));
    }

    #[test]
    fn test_retail_mixed_container() {
        let input = vec![store("store-1"), inventory("inv-1", 5, 40)];
        let reports = check_all(KindArg::Retail, input);
        assert!(reports.iter().all(|(_, report)| report.is_valid()));
    }

    #[test]
    fn test_missing_id_reported_as_none() {
        let mut doc = store("store-1");
        doc.as_object_mut().unwrap().remove("id");
        let reports = check_all(KindArg::Store, vec![doc]);
        assert_eq!(reports[0].0, None);
        assert!(!reports[0].1.is_valid());
    }

    #[test]
    fn test_order_amount_overflow_is_reported() {
        let order = json!({
            "id": "ord-1",
            "customerId": "cust-1",
            "orderNumber": "SO-1",
            "orderDate": "2024-02-01T12:00:00Z",
            "status": "Pending",
            "payment": { "method": "Card", "status": "Authorized" },
            "shipping": {},
            "amounts": { "subTotal": 0, "tax": 0, "shipping": 0, "discount": 0, "total": 0 },
            "lineItems": [{
                "productId": "prod-1",
                "productCode": "SKU-1",
                "name": "Widget",
                "unitPrice": "79228162514264337593543950335",
                "quantity": 2,
                "lineTotal": 0
            }]
        });
        let reports = check_all(KindArg::Order, vec![order]);
        assert!(matches!(
            &reports[0].1,
            DocumentReport::Inconsistent(issues) if issues.iter().any(|i| i.contains("overflow"))
        ));
    }

    #[test]
    fn test_read_input_single_and_array() {
        let mut single = tempfile::NamedTempFile::new().unwrap();
        write!(single, "{}", store("store-1")).unwrap();
        assert_eq!(read_input(single.path()).unwrap().len(), 1);

        let mut array = tempfile::NamedTempFile::new().unwrap();
        write!(array, "{}", json!([store("store-1"), store("store-2")])).unwrap();
        assert_eq!(read_input(array.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_read_input_missing_file() {
        let result = read_input(Path::new("does-not-exist.json"));
        assert!(matches!(result, Err(ValidateError::Read { .. })));
    }

    #[test]
    fn test_run_reports_failures() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let input = json!([inventory("inv-1", 5, 40), inventory("inv-2", 50, 40)]);
        write!(file, "{input}").unwrap();

        let err = run(KindArg::Inventory, file.path()).unwrap_err();
        assert!(matches!(err, ValidateError::Failed { invalid: 1, total: 2 }));
    }

    #[test]
    fn test_run_accepts_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", store("store-1")).unwrap();
        assert!(run(KindArg::Store, file.path()).is_ok());
    }

    #[test]
    fn test_run_rejects_non_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "id,name\n1,Widget").unwrap();
        assert!(matches!(
            run(KindArg::Product, file.path()),
            Err(ValidateError::Json { .. })
        ));
    }
}
