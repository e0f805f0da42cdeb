//! Reusable field coercions
//!
//! Product rows come from a remote API and are not trusted to be well formed.
//! These helpers turn loosely typed JSON values into the text and numbers the
//! query pipeline compares, defaulting instead of failing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Normalize text for searching and sorting: trim, then lower-case
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Coerce a JSON scalar to display text
///
/// Missing, `null`, `false`, zero and empty values become the empty string.
pub fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

/// Serde helper: accept any scalar where text is expected
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(text_of(Some(&v))),
    })
}

/// Serde helper: accept numbers or numeric strings where a price is expected
///
/// Anything else (booleans, objects, unparseable text, NaN) reads as no price,
/// which sorts as 0.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        Some(_) => None,
    })
}
