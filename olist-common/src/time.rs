//! Timestamp utilities
//!
//! Source tables store timestamps as naive local times
//! (`2017-10-02 10:56:33`). Everything here works on `NaiveDateTime`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::{Error, Result};

const SECONDS_PER_DAY: i64 = 86_400;

/// Layouts accepted for datetime cells, tried in order
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a source-table timestamp
///
/// A bare date (`2018-01-15`) is taken as midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    for layout in DATETIME_LAYOUTS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(ts);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    Err(Error::Timestamp {
        value: value.to_string(),
        reason: "expected YYYY-MM-DD[ HH:MM:SS]".to_string(),
    })
}

/// Calendar month of a timestamp as `YYYY-MM`
///
/// Lexicographic order of these keys is chronological order.
pub fn month_key(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m").to_string()
}

/// Whole days between purchase and delivery, floored
///
/// 36 hours is 1 day; -6 hours is -1 day.
pub fn delivery_days(purchased: &NaiveDateTime, delivered: &NaiveDateTime) -> i64 {
    (*delivered - *purchased)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

/// serde adapter for a required timestamp column
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// serde adapter for a nullable timestamp column (empty cell is `None`)
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => parse_timestamp(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
