//! Local wall-clock timestamps in the `YYYY-MM-DD HH:MM:SS` format used by
//! batch output files.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::CoreError;

/// Format string for report timestamps.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the current local time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Parses a report timestamp.
pub fn parse(value: &str) -> Result<NaiveDateTime, CoreError> {
    NaiveDateTime::parse_from_str(value, FORMAT)
        .map_err(|e| CoreError::InvalidData(format!("Invalid timestamp '{value}': {e}")))
}

/// Serializes a timestamp with [`FORMAT`].
pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(FORMAT))
}

/// Deserializes a timestamp written with [`FORMAT`].
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
