//! `deserialize_with` helpers that never fail on an unexpected JSON shape.
//!
//! Fields decoded through these come back as `None` (or an empty `Vec`) when
//! the upstream value is missing or has the wrong type. Struct targets only
//! ever decode from JSON objects; serde would otherwise fill them from an
//! array by position.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Decode into `Some(T)` when the value fits `T`, otherwise `None`.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// Like [`option`], for struct targets: anything but a JSON object is `None`.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(from_object))
}

/// Decode `value` as `T` only if it is a JSON object.
pub fn from_object<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// First of `keys` present in `map`. Used where a provider sends the same
/// field under numbered ("05. price") and plain ("price") names.
pub fn first<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key))
}

/// Decode an array of objects, dropping elements that are not objects or do
/// not fit `T`. Non-arrays decode to an empty `Vec`.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let items = match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(from_object)
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}
