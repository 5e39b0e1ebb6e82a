//! Category snapshot embedded in products.

use serde::{Deserialize, Serialize};

use super::Schema;

/// A denormalized copy of a category, embedded by value inside a
/// [`Product`](super::Product). It is not a reference: later changes to the
/// category are not reflected in products already written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySnapshot {
    pub id: String,
    pub name: String,
    pub r#type: String,
}

impl Schema for CategorySnapshot {
    const NAME: &'static str = "CategorySnapshot";
    const FIELDS: &'static [&'static str] = &["id", "name", "type"];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::documents::fixtures;
    use crate::documents::{from_json, to_value};

    #[test]
    fn test_type_key_is_not_raw_identifier() {
        let value = to_value(&fixtures::category()).unwrap();
        assert_eq!(value["type"], json!("Bikes"));
        assert!(value.get("r#type").is_none());
    }

    #[test]
    fn test_missing_type_fails() {
        let result = from_json::<CategorySnapshot>(r#"{"id": "c1", "name": "Bikes"}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("missing field `type`"));
    }
}
