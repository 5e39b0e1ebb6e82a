//! Opt-in consistency checks for documents.
//!
//! Deserialization only checks shape. The rules here cover relationships
//! between fields (totals that should add up, stock bounds) and are run
//! explicitly by callers that want them, e.g. before a write.

use core::fmt;

use chrono::NaiveTime;

use crate::documents::{Order, Product, RetailDocument, RetailInventory, RetailStore};
use crate::Money;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Serialized path of the offending field, e.g. `amounts.total`.
    pub field: String,
    /// What is wrong.
    pub message: String,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Records that can check their own consistency.
pub trait Validate {
    /// Returns every rule violation; an empty vector means the record is
    /// consistent.
    fn validate(&self) -> Vec<ValidationIssue>;

    /// Whether [`validate`](Self::validate) finds nothing.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_non_negative(issues: &mut Vec<ValidationIssue>, field: &str, amount: Money) {
    if amount.is_negative() {
        issues.push(ValidationIssue::new(
            field,
            format!("must not be negative (got {amount})"),
        ));
    }
}

impl Validate for Product {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_non_negative(&mut issues, "msrp", self.msrp);
        check_non_negative(&mut issues, "costPrice", self.cost_price);
        issues
    }
}

impl Validate for Order {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let amounts = &self.amounts;

        check_non_negative(&mut issues, "amounts.subTotal", amounts.sub_total);
        check_non_negative(&mut issues, "amounts.tax", amounts.tax);
        check_non_negative(&mut issues, "amounts.shipping", amounts.shipping);
        check_non_negative(&mut issues, "amounts.discount", amounts.discount);
        check_non_negative(&mut issues, "amounts.total", amounts.total);

        match amounts.expected_total() {
            None => issues.push(ValidationIssue::new(
                "amounts.total",
                "amount overflow computing subTotal + tax + shipping - discount",
            )),
            Some(expected) if amounts.total != expected => issues.push(ValidationIssue::new(
                "amounts.total",
                format!(
                    "expected subTotal + tax + shipping - discount = {expected}, got {}",
                    amounts.total
                ),
            )),
            Some(_) => {}
        }

        for (index, line) in self.line_items.iter().enumerate() {
            check_non_negative(
                &mut issues,
                &format!("lineItems[{index}].unitPrice"),
                line.unit_price,
            );
            let field = format!("lineItems[{index}].lineTotal");
            match line.unit_price.checked_mul(line.quantity) {
                None => issues.push(ValidationIssue::new(
                    field,
                    "amount overflow computing unitPrice x quantity",
                )),
                Some(expected) if line.line_total != expected => {
                    issues.push(ValidationIssue::new(
                        field,
                        format!(
                            "expected unitPrice x quantity = {expected}, got {}",
                            line.line_total
                        ),
                    ));
                }
                Some(_) => {}
            }
        }

        issues
    }
}

impl Validate for RetailStore {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (field, value) in [("hours.open", &self.hours.open), ("hours.close", &self.hours.close)]
        {
            if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
                issues.push(ValidationIssue::new(
                    field,
                    format!("expected HH:MM time of day, got {value:?}"),
                ));
            }
        }
        issues
    }
}

impl Validate for RetailInventory {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("currentStock", self.current_stock),
            ("minimumStock", self.minimum_stock),
            ("maximumStock", self.maximum_stock),
        ] {
            if value < 0 {
                issues.push(ValidationIssue::new(
                    field,
                    format!("must not be negative (got {value})"),
                ));
            }
        }
        if self.minimum_stock > self.maximum_stock {
            issues.push(ValidationIssue::new(
                "minimumStock",
                format!(
                    "exceeds maximumStock ({} > {})",
                    self.minimum_stock, self.maximum_stock
                ),
            ));
        }
        issues
    }
}

impl Validate for RetailDocument {
    fn validate(&self) -> Vec<ValidationIssue> {
        match self {
            Self::Store(store) => store.validate(),
            Self::Inventory(inventory) => inventory.validate(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::documents::fixtures::{self, money};
    use crate::documents::StoreHours;

    #[test]
    fn test_fixtures_are_valid() {
        assert!(fixtures::product().is_valid());
        assert!(fixtures::order().is_valid());
        assert!(fixtures::store().is_valid());
        assert!(fixtures::inventory().is_valid());
    }

    #[test]
    fn test_negative_msrp() {
        let mut product = fixtures::product();
        product.msrp = money("-1.00");
        let issues = product.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "msrp");
    }

    #[test]
    fn test_total_mismatch() {
        let mut order = fixtures::order();
        order.amounts.total = money("50.00");
        let issues = order.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "amounts.total");
        assert!(issues[0].message.contains("46.18"));
    }

    #[test]
    fn test_total_ignores_trailing_zero_scale() {
        let mut order = fixtures::order();
        order.amounts.total = money("46.180");
        assert!(order.is_valid());
    }

    #[test]
    fn test_line_total_mismatch() {
        let mut order = fixtures::order();
        order.line_items[0].quantity = 3;
        let issues = order.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "lineItems[0].lineTotal");
    }

    #[test]
    fn test_line_total_overflow_reported() {
        let mut order = fixtures::order();
        order.line_items[0].unit_price = money("79228162514264337593543950335");
        order.line_items[0].quantity = 2;
        let fields: Vec<_> = order.validate().into_iter().map(|i| i.field).collect();
        assert_eq!(fields, ["lineItems[0].lineTotal"]);
    }

    #[test]
    fn test_line_total_overflow_from_json() {
        let text = crate::to_json(&fixtures::order())
            .unwrap()
            .replace(r#""unitPrice":19.99"#, r#""unitPrice":79228162514264337593543950335"#);
        let order: Order = crate::from_json(&text).unwrap();
        assert_eq!(order.line_items[0].quantity, 2);

        let issues = order.validate();
        assert!(issues
            .iter()
            .any(|i| i.field == "lineItems[0].lineTotal" && i.message.contains("overflow")));
    }

    #[test]
    fn test_expected_total_overflow_reported() {
        let mut order = fixtures::order();
        order.amounts.sub_total = Money::new(rust_decimal::Decimal::MAX);
        order.amounts.tax = money("1");
        let issues = order.validate();
        let overflow: Vec<_> = issues
            .iter()
            .filter(|i| i.field == "amounts.total")
            .collect();
        assert_eq!(overflow.len(), 1);
        assert!(overflow[0].message.contains("overflow"));
    }

    #[test]
    fn test_bad_store_hours() {
        let mut store = fixtures::store();
        store.hours = StoreHours {
            open: "9am".to_owned(),
            close: "25:00".to_owned(),
        };
        let fields: Vec<_> = store.validate().into_iter().map(|i| i.field).collect();
        assert_eq!(fields, ["hours.open", "hours.close"]);
    }

    #[test]
    fn test_stock_bounds() {
        let mut inventory = fixtures::inventory();
        inventory.minimum_stock = 50;
        inventory.current_stock = -2;
        let issues = inventory.validate();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "currentStock");
        assert_eq!(issues[1].field, "minimumStock");
    }

    #[test]
    fn test_retail_document_delegates() {
        let mut inventory = fixtures::inventory();
        inventory.maximum_stock = 1;
        let doc = RetailDocument::from(inventory);
        assert!(!doc.is_valid());
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new("msrp", "must not be negative (got -1)");
        assert_eq!(issue.to_string(), "msrp: must not be negative (got -1)");
    }
}
