//! Exact decimal amounts for prices and order totals.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Map key `serde_json` uses to hand over the raw text of a number when its
/// `arbitrary_precision` feature is enabled.
const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// A monetary amount backed by [`Decimal`].
///
/// Serialized as a bare JSON number carrying the exact decimal text
/// (`19.99`, never `19.989999...` and never `"19.99"`). Deserialization
/// accepts JSON numbers, including ones too precise for `f64`, and numeric
/// strings.
///
/// ## Examples
///
/// ```
/// use fabric_seed_core::Money;
///
/// let price: Money = "19.99".parse().unwrap();
/// assert_eq!(serde_json::to_string(&price).unwrap(), "19.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build an amount from an integer count of minor units, e.g. cents.
    ///
    /// # Panics
    ///
    /// Panics if `scale` exceeds 28, the largest scale [`Decimal`] supports.
    #[must_use]
    pub fn from_minor(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Sum of two amounts, or `None` if it does not fit in a [`Decimal`].
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Difference of two amounts, or `None` if it does not fit in a
    /// [`Decimal`].
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// The amount times a quantity, or `None` if it does not fit in a
    /// [`Decimal`].
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Parse an amount from decimal or scientific notation.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a number representable as a
    /// [`Decimal`].
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        let s = s.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Number::from_str(&self.0.to_string())
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl MoneyVisitor {
    fn parse<E: de::Error>(raw: &str) -> Result<Money, E> {
        Money::parse(raw).map_err(|_| E::invalid_value(Unexpected::Str(raw), &MoneyVisitor))
    }
}

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money(Decimal::from(v)))
    }

    // Only reached for floats whose shortest representation is the source
    // text, so going through `to_string` is exact.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::invalid_type(Unexpected::Float(v), &self));
        }
        Self::parse(&v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Self::parse(v)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Money, A::Error> {
        let key: Option<String> = map.next_key()?;
        if key.as_deref() != Some(JSON_NUMBER_TOKEN) {
            return Err(de::Error::invalid_type(Unexpected::Map, &self));
        }
        let raw: String = map.next_value()?;
        Self::parse(&raw)
    }
}
