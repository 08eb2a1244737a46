//! Naive timestamp handling
//!
//! The backend stores payment dates as local date-times without an offset.
//! Client timestamps are therefore sent as `YYYY-MM-DDTHH:MM:SS`: the
//! fractional seconds and the UTC marker are removed before transmission.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// Wire format for naive timestamps
pub const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Errors raised while interpreting timestamps
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Drops sub-second precision
pub fn truncate_to_seconds(value: NaiveDateTime) -> NaiveDateTime {
    value.with_nanosecond(0).unwrap_or(value)
}

/// Formats a UTC instant as a naive timestamp (`2025-11-09T17:21:00`)
pub fn naive_timestamp(value: &DateTime<Utc>) -> String {
    format_naive(&value.naive_utc())
}

/// Formats a naive date-time without fractional seconds
pub fn format_naive(value: &NaiveDateTime) -> String {
    truncate_to_seconds(*value).format(NAIVE_TIMESTAMP_FORMAT).to_string()
}

/// Midnight at the start of the given calendar date
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Normalizes an ISO-8601 string to the naive wire format
///
/// Accepts `2025-11-09T17:21:00.000Z`, `2025-11-09T17:21:00Z`,
/// `2025-11-09T17:21:00` and a bare date `2025-11-09` (midnight).
pub fn strip_to_naive(input: &str) -> Result<NaiveDateTime, TemporalError> {
    let trimmed = input.trim();
    let without_zone = trimmed.trim_end_matches('Z').trim_end_matches('z');
    let without_fraction = without_zone.split('.').next().unwrap_or(without_zone);

    if let Ok(value) = NaiveDateTime::parse_from_str(without_fraction, NAIVE_TIMESTAMP_FORMAT) {
        return Ok(value);
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(without_fraction, "%Y-%m-%dT%H:%M") {
        return Ok(value);
    }
    NaiveDate::parse_from_str(without_fraction, "%Y-%m-%d")
        .map(start_of_day)
        .map_err(|_| TemporalError::InvalidTimestamp(input.to_string()))
}

/// Serde adapter writing `NaiveDateTime` in the naive wire format
pub mod naive_seconds {
    use super::*;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_naive(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        strip_to_naive(&raw).map_err(serde::de::Error::custom)
    }
}
