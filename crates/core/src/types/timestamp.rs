//! UTC timestamp type used by every dated document field.

use core::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Timestamp`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The input string is empty.
    #[error("timestamp cannot be empty")]
    Empty,
    /// The input is neither RFC 3339 nor an ISO 8601 local date-time.
    #[error("invalid timestamp: {0}")]
    Invalid(String),
}

/// A point in time, always normalized to UTC.
///
/// Serialized as RFC 3339 with a `Z` suffix and only as many fractional digits
/// as the value carries (`2024-03-01T09:30:00Z`, `2024-03-01T09:30:00.250Z`).
///
/// Parsing accepts RFC 3339 with any offset, and also a bare
/// `YYYY-MM-DDTHH:MM:SS[.fff]` without an offset, which is read as UTC.
/// Source exports frequently omit the offset.
///
/// ## Examples
///
/// ```
/// use fabric_seed_core::Timestamp;
///
/// let ts = Timestamp::parse("2024-03-01T10:30:00+01:00").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-01T09:30:00Z");
///
/// let naive = Timestamp::parse("2024-03-01T09:30:00").unwrap();
/// assert_eq!(naive, ts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Format accepted for offset-less input.
    const NAIVE_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.f";

    /// Wrap a UTC date-time.
    #[must_use]
    pub const fn new(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse a `Timestamp` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not a recognizable
    /// date-time.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimestampError::Empty);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        NaiveDateTime::parse_from_str(s, Self::NAIVE_FORMAT)
            .map(|naive| Self(naive.and_utc()))
            .map_err(|_| TimestampError::Invalid(s.to_owned()))
    }

    /// Returns the underlying UTC date-time.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Consumes the `Timestamp` and returns the UTC date-time.
    #[must_use]
    pub const fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl std::str::FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_rfc3339_utc() {
        let ts = Timestamp::parse("2024-03-01T09:30:00Z").unwrap();
        assert_eq!(
            ts.into_inner(),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_normalizes_offset() {
        let ts = Timestamp::parse("2024-03-01T04:30:00-05:00").unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T09:30:00Z");
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let ts = Timestamp::parse("2024-03-01T09:30:00.5").unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T09:30:00.500Z");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Timestamp::parse("  "), Err(TimestampError::Empty));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Timestamp::parse("yesterday"),
            Err(TimestampError::Invalid(_))
        ));
        assert!(Timestamp::parse("2024-02-30T00:00:00Z").is_err());
    }

    #[test]
    fn test_display_keeps_sub_second_precision() {
        let dt = Utc
            .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
            .unwrap()
            .checked_add_signed(chrono::Duration::microseconds(1234))
            .unwrap();
        let ts = Timestamp::new(dt);
        assert_eq!(ts.to_string(), "2024-03-01T09:30:00.001234Z");
        assert_eq!(Timestamp::parse(&ts.to_string()).unwrap(), ts);
    }

    #[test]
    fn test_serde_roundtrip() {
        let ts = Timestamp::parse("2024-03-01T09:30:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-03-01T09:30:00Z\"");

        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn test_deserialize_rejects_non_string() {
        assert!(serde_json::from_str::<Timestamp>("1709285400").is_err());
    }
}
