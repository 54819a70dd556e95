//! `serde(with = ...)` helpers for numeric fields that upstream providers
//! send either as JSON numbers or as strings ("189.8400", "-0.5123%").

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Interpret a JSON value as a number, if it plausibly is one.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

/// Parse a numeric string, ignoring surrounding whitespace and a trailing `%`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_end_matches('%').trim();
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(n) => serializer.serialize_f64(*n),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_f64))
}
