//! Timestamps as the API sends them.
//!
//! The server's formats are not guaranteed, so the raw value is kept verbatim
//! for display and only interpreted on request. An odd value in one record
//! never fails the surrounding list.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Point in time reported by the API, kept exactly as received.
///
/// Strings and numbers are accepted; numbers are epoch milliseconds.
///
/// # Examples
/// ```
/// use status_client::domain::Timestamp;
///
/// let sql_style: Timestamp = serde_json::from_str(r#""2024-05-01 10:00:00""#).unwrap();
/// assert_eq!(sql_style.as_str(), "2024-05-01 10:00:00");
/// assert!(sql_style.to_utc().is_some());
///
/// let odd: Timestamp = serde_json::from_str(r#""yesterday""#).unwrap();
/// assert_eq!(odd.to_utc(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wrap a raw value without interpreting it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The value as received.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Interpret the value as a UTC instant.
    ///
    /// Tries RFC 3339, then zone-less date-times read as UTC, then bare dates
    /// at midnight, then epoch milliseconds. Returns `None` when nothing fits.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Some(Utc.from_utc_datetime(&naive));
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
        }
        raw.parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a timestamp string or epoch milliseconds")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Timestamp::new(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Timestamp(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Timestamp(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Timestamp(value.to_string()))
    }
}
