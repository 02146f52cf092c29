//! Tier 1: structured JSON extraction.
//!
//! Locates a JSON payload inside the raw response (fenced code block,
//! or an object/array embedded in prose) and coerces it into test-case
//! shapes. Anything that fails to parse falls through to the textual
//! tier; this module never errors.

use serde_json::Value;
use testmate_core::{TestCase, TestCaseSet};

/// Try to adopt test cases from a JSON payload in the text.
///
/// Accepts either a bare array of test-case objects or an object carrying
/// a `testCases` / `test_cases` array. Returns `None` when no valid,
/// non-empty payload is found.
pub(crate) fn parse_json_cases(text: &str) -> Option<TestCaseSet> {
    let json = extract_json(text)?;
    let value: Value = serde_json::from_str(&json).ok()?;
    let cases = cases_from_value(value)?;
    Some(TestCaseSet::from(cases))
}

/// Coerce a JSON value into a non-empty list of test cases.
fn cases_from_value(value: Value) -> Option<Vec<TestCase>> {
    let array = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove("testCases")
            .or_else(|| map.remove("test_cases"))?,
        _ => return None,
    };
    let cases: Vec<TestCase> = serde_json::from_value(array).ok()?;
    if cases.is_empty() {
        None
    } else {
        Some(cases)
    }
}

/// Find a JSON payload in text that may contain markdown or prose.
fn extract_json(text: &str) -> Option<String> {
    let text = text.trim();

    if let Some(json) = extract_from_fenced_json(text) {
        return Some(json);
    }
    if let Some(json) = extract_from_fenced_plain(text) {
        return Some(json);
    }
    if let Some(json) = find_delimited(text, '[', ']') {
        return Some(json);
    }
    if let Some(json) = find_delimited(text, '{', '}') {
        return Some(json);
    }
    if serde_json::from_str::<Value>(text).is_ok() {
        return Some(text.to_string());
    }
    None
}

/// Extract from a ```json ... ``` block.
fn extract_from_fenced_json(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let start = lower.find("```json")?;
    let content_start = start + "```json".len();
    let rest = &text[content_start..];
    let end = rest.find("```")?;
    let content = rest[..end].trim();
    if serde_json::from_str::<Value>(content).is_ok() {
        Some(content.to_string())
    } else {
        None
    }
}

/// Extract from a plain ``` ... ``` block without a language tag.
fn extract_from_fenced_plain(text: &str) -> Option<String> {
    if !text.starts_with("```") {
        return None;
    }
    let rest = &text[3..];
    let content_start = rest.find('\n').map(|i| i + 1).unwrap_or(0);
    let rest = &rest[content_start..];
    let end = rest.find("```")?;
    let content = rest[..end].trim();
    if serde_json::from_str::<Value>(content).is_ok() {
        Some(content.to_string())
    } else {
        None
    }
}

/// Find a balanced `open`..`close` span that parses as JSON, honoring
/// string literals and escapes.
fn find_delimited(text: &str, open: char, close: char) -> Option<String> {
    let start = text.find(open)?;

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    let candidate = &text[start..start + i + c.len_utf8()];
                    if serde_json::from_str::<Value>(candidate).is_ok() {
                        return Some(candidate.to_string());
                    }
                    return None;
                }
            }
            _ => {}
        }
    }
    None
}
