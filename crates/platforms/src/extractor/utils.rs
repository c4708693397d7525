use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[inline]
pub fn capture_group_1<'a>(re: &Regex, input: &'a str) -> Option<&'a str> {
    re.captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Read a count that platforms send either as a JSON number or as a numeric string.
#[inline]
pub fn value_as_u64(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        Some(n)
    } else if let Some(s) = value.as_str() {
        s.trim().parse::<u64>().ok()
    } else {
        None
    }
}

/// Serde adapter for [`value_as_u64`].
pub fn deserialize_u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_as_u64(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a count, got {value}")))
}

/// Treat JSON `null` the same as a missing string.
pub fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
