//! Recovery of JSON payloads from free-form model replies.
//!
//! Models wrap answers in code fences, prepend chatter, or append notes.
//! [`extract_json`] tries progressively looser readings and only reports a
//! [`ParseError`] once all of them fail. Schema checks belong to the caller.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

/// Openers tried by the streaming scan, to bound work on long replies.
const MAX_SCAN_STARTS: usize = 64;
const SNIPPET_CHARS: usize = 80;

static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)```(?:json)?\s*").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no JSON payload in model reply starting {snippet:?}")]
pub struct ParseError {
    snippet: String,
}

impl ParseError {
    fn new(reply: &str) -> Self {
        Self {
            snippet: reply.chars().take(SNIPPET_CHARS).collect(),
        }
    }
}

/// The first JSON object or array the reply carries.
pub fn extract_json(reply: &str) -> Result<Value, ParseError> {
    let cleaned = FENCE.replace_all(reply, "");
    let cleaned = cleaned.trim();

    if let Some(value) = parse_structured(cleaned) {
        return Ok(value);
    }

    let mut spans: Vec<(usize, &str)> = [('{', '}'), ('[', ']')]
        .iter()
        .filter_map(|&(open, close)| {
            let start = cleaned.find(open)?;
            let end = cleaned.rfind(close)?;
            (end > start).then(|| (start, &cleaned[start..=end]))
        })
        .collect();
    spans.sort_by_key(|(start, _)| *start);
    if let Some(value) = spans.iter().find_map(|(_, span)| parse_structured(span)) {
        return Ok(value);
    }

    // Trailing prose with its own brackets defeats the span heuristic; read
    // one value from each opener and ignore whatever follows it.
    let starts = cleaned
        .match_indices('{')
        .chain(cleaned.match_indices('['))
        .map(|(idx, _)| idx)
        .take(MAX_SCAN_STARTS);
    for start in starts {
        let mut stream = serde_json::Deserializer::from_str(&cleaned[start..]).into_iter::<Value>();
        if let Some(Ok(value)) = stream.next()
            && (value.is_object() || value.is_array())
        {
            return Ok(value);
        }
    }

    Err(ParseError::new(reply))
}

/// Like [`extract_json`], then deserialized into `T`.
pub fn extract_json_as<T: serde::de::DeserializeOwned>(reply: &str) -> Result<T, ParseError> {
    let value = extract_json(reply)?;
    serde_json::from_value(value).map_err(|_| ParseError::new(reply))
}

fn parse_structured(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(|value| value.is_object() || value.is_array())
}

/// Trimmed, non-empty string field.
pub fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Non-empty strings of an array field; anything else is skipped.
pub fn str_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
