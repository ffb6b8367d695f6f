//! Format Sniffer: classifies raw CV content without parsing or mutating it.
//!
//! HTML is authoritative: once a string carries an HTML document marker it is
//! never handed to the JSON parser. The one exception is a JSON string literal
//! (`"..."`), which is how an HTML document looks after it has been encoded;
//! that is classified as JSON so the unwrapper can decode it.

use serde::Serialize;
use serde_json::Value;

/// Markers that identify a complete HTML document.
const HTML_MARKERS: &[&str] = &["<!doctype html", "<html>", "<html "];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    /// Full HTML document. Rendered as-is.
    Html,
    /// Already-structured JSON (object, array, or any non-string value).
    StructuredObject,
    /// A string whose outer characters look like JSON text.
    LikelyJson,
    /// Plain text with no HTML markers and no JSON framing.
    Unknown,
}

/// Classifies a raw content value.
pub fn sniff(value: &Value) -> ContentFormat {
    match value {
        Value::String(text) => sniff_str(text),
        _ => ContentFormat::StructuredObject,
    }
}

/// Classifies a raw content string.
pub fn sniff_str(text: &str) -> ContentFormat {
    if is_html(text) && !is_json_string_literal(text) {
        ContentFormat::Html
    } else if looks_like_json(text) {
        ContentFormat::LikelyJson
    } else {
        ContentFormat::Unknown
    }
}

/// True if the string contains an HTML document marker (`<!DOCTYPE html>` or `<html>`).
pub fn is_html(text: &str) -> bool {
    // Markers are ASCII, so lowercasing the haystack cannot shift match positions.
    let lower = text.to_ascii_lowercase();
    HTML_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Bracket heuristic: starts with `{`, `[` or `"` and ends with the matching closer.
pub fn looks_like_json(text: &str) -> bool {
    let text = text.trim();
    if text.len() < 2 {
        return false;
    }
    matches!(
        (text.as_bytes()[0], text.as_bytes()[text.len() - 1]),
        (b'{', b'}') | (b'[', b']') | (b'"', b'"')
    )
}

fn is_json_string_literal(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}
