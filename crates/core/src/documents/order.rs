//! Sales order documents and their embedded value objects.

use serde::{Deserialize, Serialize};

use super::{Document, DocumentKind, Schema};
use crate::{Money, Timestamp};

/// A customer order with payment, shipping, totals and line items embedded.
///
/// `status` is free text; the source system's values are not constrained
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub order_number: String,
    pub order_date: Timestamp,
    pub status: String,
    pub payment: PaymentInfo,
    pub shipping: ShippingInfo,
    pub billing_address: Option<String>,
    pub sales_employee_id: Option<String>,
    pub amounts: Amounts,
    pub line_items: Vec<OrderLineItem>,
}

/// How an order was paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub method: String,
    pub status: String,
}

/// Shipping progress. Every field stays `None` until the matching event has
/// happened.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub address: Option<String>,
    pub ship_date: Option<Timestamp>,
    pub delivery_date: Option<Timestamp>,
    /// Fulfilling facility.
    pub facility_id: Option<String>,
}

/// Order totals.
///
/// `total` is expected to equal `sub_total + tax + shipping - discount`;
/// see [`Amounts::expected_total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amounts {
    pub sub_total: Money,
    pub tax: Money,
    pub shipping: Money,
    pub discount: Money,
    pub total: Money,
}

impl Amounts {
    /// The total implied by the other amounts, or `None` if computing it
    /// overflows.
    #[must_use]
    pub fn expected_total(&self) -> Option<Money> {
        self.sub_total
            .checked_add(self.tax)?
            .checked_add(self.shipping)?
            .checked_sub(self.discount)
    }
}

/// One product line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: String,
    pub product_code: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

impl Schema for Order {
    const NAME: &'static str = "Order";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "customerId",
        "orderNumber",
        "orderDate",
        "status",
        "payment",
        "shipping",
        "billingAddress",
        "salesEmployeeId",
        "amounts",
        "lineItems",
    ];
}

impl Schema for PaymentInfo {
    const NAME: &'static str = "PaymentInfo";
    const FIELDS: &'static [&'static str] = &["method", "status"];
}

impl Schema for ShippingInfo {
    const NAME: &'static str = "ShippingInfo";
    const FIELDS: &'static [&'static str] = &["address", "shipDate", "deliveryDate", "facilityId"];
}

impl Schema for Amounts {
    const NAME: &'static str = "Amounts";
    const FIELDS: &'static [&'static str] = &["subTotal", "tax", "shipping", "discount", "total"];
}

impl Schema for OrderLineItem {
    const NAME: &'static str = "OrderLineItem";
    const FIELDS: &'static [&'static str] = &[
        "productId",
        "productCode",
        "name",
        "unitPrice",
        "quantity",
        "lineTotal",
    ];
}

impl Document for Order {
    const KIND: DocumentKind = DocumentKind::Order;
    const DEFAULT_CONTAINER: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }
}
