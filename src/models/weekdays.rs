use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Result of decoding the `dias_semana` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredWeekdays {
    Sequence(Vec<String>),
    ParseError(String),
}

/// Tagged decode of the stored JSON text.
pub fn decode(raw: &str) -> StoredWeekdays {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => StoredWeekdays::Sequence(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        Ok(Value::String(s)) => StoredWeekdays::Sequence(vec![s]),
        Ok(Value::Null) => StoredWeekdays::Sequence(Vec::new()),
        Ok(_) | Err(_) => StoredWeekdays::ParseError(raw.to_string()),
    }
}

/// Always yields a list; rows written by older code paths may hold a bare
/// weekday name instead of JSON.
pub fn normalize(raw: Option<&str>) -> Vec<String> {
    match raw.map(decode) {
        None => Vec::new(),
        Some(StoredWeekdays::Sequence(days)) => days,
        Some(StoredWeekdays::ParseError(raw)) if raw.trim().is_empty() => Vec::new(),
        Some(StoredWeekdays::ParseError(raw)) => vec![raw],
    }
}

pub fn encode(days: &[String]) -> String {
    serde_json::to_string(days).unwrap_or_else(|_| "[]".to_string())
}

/// Accepts any JSON for `dias_semana`; anything but an array becomes empty.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
