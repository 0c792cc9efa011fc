//! Normalization of fetched description content
//!
//! Payloads are JSON objects written by marketplace front-ends. Nothing about
//! their shape is trusted: every field is extracted on its own and dropped if
//! absent or of the wrong type.

use crate::core::{IndexerError, IndexerResult};
use serde_json::{Map, Value};

/// Keyword list in both stored forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    /// Lower-cased input
    pub raw: String,
    /// Comma/space separated tokens of `raw`, in order
    pub canonical: Vec<String>,
}

impl Keywords {
    /// Lower-case, fold `", "` and `" "` into `","`, then split on `","`.
    ///
    /// Purely textual: tokens are not trimmed, deduplicated or validated, so
    /// `"a  b"` yields an empty token between `a` and `b`.
    pub fn parse(input: &str) -> Self {
        let raw = input.to_lowercase();
        let canonical = raw
            .replace(", ", ",")
            .replace(' ', ",")
            .split(',')
            .map(str::to_string)
            .collect();
        Self { raw, canonical }
    }
}

/// Fields extracted from a description payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFields {
    pub title: Option<String>,
    pub about: Option<String>,
    pub role: Option<String>,
    pub rate_token: Option<String>,
    pub rate_amount: Option<String>,
    pub keywords: Option<Keywords>,
}

/// Parse a payload into its known fields.
///
/// Fails only when the payload is not a JSON object.
pub fn normalize(payload: &[u8]) -> IndexerResult<NormalizedFields> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| IndexerError::MalformedContent(e.to_string()))?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(IndexerError::MalformedContent(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            )))
        }
    };

    Ok(NormalizedFields {
        title: string_field(&object, "title"),
        about: string_field(&object, "about"),
        role: string_field(&object, "role"),
        rate_token: string_field(&object, "rateToken"),
        rate_amount: amount_field(&object, "rateAmount"),
        keywords: string_field(&object, "keywords").map(|k| Keywords::parse(&k)),
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

// Amounts show up both as strings and as bare numbers
fn amount_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
