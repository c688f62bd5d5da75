use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::models::classification::prior_confidence;

/// Date format used by the extractor and in rendered documents
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

const NAIVE_FORMATS: [&str; 3] = [MINUTE_FORMAT, "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a best-effort session date.
///
/// Accepts minute-precision strings (`2025-11-02 09:41`), naive ISO strings, RFC3339
/// strings (converted to local time) and integer Unix timestamps in milliseconds.
pub fn parse_session_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => {
            let ms = n.as_i64()?;
            DateTime::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&Local).naive_local())
        }
        Value::String(s) => {
            let s = s.trim();
            if let Some(parsed) =
                NAIVE_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            {
                return Some(parsed);
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        }
        _ => None,
    }
}

/// Deserializer for dates that yields `None` instead of failing on unrecognised input
pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_session_date(&value))
}

/// Serialize dates at minute precision, `null` when absent
pub fn serialize_minute_date<S>(
    date: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&d.format(MINUTE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

/// Strings pass through, numbers are stringified, anything else becomes empty
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Optional free text; only a JSON string is kept
pub fn deserialize_lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Flags; anything but a JSON boolean is `false`
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Nested records; a value that is not an object decodes as the default
pub fn deserialize_object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(D::Error::custom)
}

/// Non-negative integer counts; floats are truncated, anything else is zero
pub fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    })
}

/// Confidence percentages clamped to `0..=100`; non-numbers fall back to the prior
pub fn deserialize_lenient_confidence<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => match n.as_i64() {
            Some(v) => v.clamp(0, 100) as u8,
            None => n.as_f64().map(|f| f.clamp(0.0, 100.0) as u8).unwrap_or_else(prior_confidence),
        },
        _ => prior_confidence(),
    })
}

/// Arrays of strings collected into a set; non-string and empty items are dropped
pub fn deserialize_string_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => BTreeSet::new(),
    })
}
