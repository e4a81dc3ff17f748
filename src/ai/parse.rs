//! Tolerant structured decode of model replies.
//!
//! Model output arrives as free text that usually, but not always, contains
//! the requested JSON. Replies are cleaned of Markdown code fences, the first
//! balanced JSON value is located, and individual fields are read with
//! per-field defaults so a partially valid reply still yields usable data.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ParseError;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:json)?").expect("valid regex"));

pub fn strip_code_fences(content: &str) -> String {
    CODE_FENCE.replace_all(content, "").trim().to_string()
}

/// Extract the first JSON object or array embedded in free text.
pub fn extract_json(content: &str) -> Result<Value, ParseError> {
    let cleaned = strip_code_fences(content);

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    let slice = balanced_slice(&cleaned).ok_or(ParseError::NoJson)?;
    Ok(serde_json::from_str(slice)?)
}

/// Find the first balanced `{...}` or `[...]` span, skipping brackets inside
/// string literals.
fn balanced_slice(text: &str) -> Option<&str> {
    let start = text.find(|c| c == '{' || c == '[')?;
    let bytes = text.as_bytes();
    let opener = bytes[start];
    let closer = if opener == b'{' { b'}' } else { b']' };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        if byte == b'"' {
            in_string = true;
        } else if byte == opener {
            depth += 1;
        } else if byte == closer {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..=i]);
            }
        }
    }

    None
}

/// Read a score field, clamped to the 0-100 range.
pub(crate) fn score_or(value: &Value, key: &str, default: u8) -> u8 {
    value
        .get(key)
        .and_then(Value::as_f64)
        .map(|score| score.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(default)
}

pub(crate) fn list_or(value: &Value, key: &str, default: Vec<String>) -> Vec<String> {
    let parsed: Option<Vec<String>> = value.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    });

    match parsed {
        Some(list) if !list.is_empty() => list,
        _ => default,
    }
}

pub(crate) fn text_or(value: &Value, key: &str, default: String) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or(default)
}
