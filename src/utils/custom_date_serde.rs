//! `serde(with = ...)` helpers for optional `YYYY-MM-DD` dates.
//!
//! Anything that is not a well-formed date decodes to `None` instead of
//! failing the whole payload.

use chrono::NaiveDate;
use serde::{self, Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%d";

/// Parse a "YYYY-MM-DD" string, also accepting a trailing time component
/// ("2024-04-05 16:00:00").
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, FORMAT).ok()
}

/// Serialize `Option<NaiveDate>` into "YYYY-MM-DD" or `null`.
pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional date string, tolerating malformed values.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_date))
}
