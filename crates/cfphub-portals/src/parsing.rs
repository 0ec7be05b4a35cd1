//! Decoding helpers shared by every portal.
//!
//! Bodies are parsed to a [`Value`] first, every blank string leaf is turned
//! into `null`, and only then is the typed model deserialized. Wire models can
//! therefore use plain `Option<String>` and never see `Some("")`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::PortalHttpResult;

/// Replace every blank string in `value`, at any depth, with `null`.
pub fn null_blank_strings(value: &mut Value) {
    match value {
        Value::String(s) if s.trim().is_empty() => *value = Value::Null,
        Value::Array(items) => items.iter_mut().for_each(null_blank_strings),
        Value::Object(map) => map.values_mut().for_each(null_blank_strings),
        _ => {}
    }
}

/// Parse `body` as JSON, apply [`null_blank_strings`], then deserialize.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> PortalHttpResult<T> {
    let mut value: Value = serde_json::from_str(body)?;
    null_blank_strings(&mut value);
    Ok(serde_json::from_value(value)?)
}

/// Parse a portal timestamp.
///
/// Accepts RFC 3339, a naive date-time (read as UTC) or a bare date
/// (midnight UTC). Anything else is `None`.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde adapter for optional timestamps in any shape [`parse_instant`]
/// understands. Unparsable values become `None` instead of failing the body.
pub fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_instant))
}

/// Serde adapter for ids that arrive as numbers or strings.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Like [`string_or_number`] for lists of ids.
pub fn string_or_number_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect())
}

/// Serde adapter that reads `null` as an empty list.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
