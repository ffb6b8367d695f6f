//! Recursive Unwrapper: resolves possibly multiply JSON-encoded content.
//!
//! Stored CV content passes through several serialize/deserialize round-trips
//! between the generation service and the record store, so a single resume may
//! arrive as a JSON string wrapping a JSON string wrapping an object. Each
//! level of unwrapping is one `serde_json::from_str` call, and the number of
//! levels is capped by [`MAX_UNWRAP_DEPTH`].
//!
//! Parsing is best-effort: a failed parse returns the text unchanged.

use serde_json::Value;
use tracing::debug;

use crate::content::sniffer::{is_html, sniff_str, ContentFormat};

/// Maximum number of JSON parse attempts made on a single value.
pub const MAX_UNWRAP_DEPTH: usize = 5;

/// Outcome of resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// An HTML document. Never re-parsed.
    Html(String),
    /// A structured JSON value (object or array).
    Structured(Value),
    /// Text that could not be resolved further: plain text, malformed JSON,
    /// or JSON-looking text left over at the depth ceiling.
    ///
    /// Ceiling leftovers are not fully resolved: feeding one back into
    /// [`unwrap`] spends a fresh depth budget and may peel further layers.
    /// Callers treat them as malformed content and never re-resolve them.
    Text(String),
}

#[cfg(test)]
impl Resolved {
    /// Converts back to a raw content value, so resolution can be re-applied.
    pub fn into_value(self) -> Value {
        match self {
            Resolved::Html(text) | Resolved::Text(text) => Value::String(text),
            Resolved::Structured(value) => value,
        }
    }
}

/// Resolves a raw content value. See module docs.
pub fn unwrap(value: Value) -> Resolved {
    unwrap_at(value, 0)
}

fn unwrap_at(value: Value, depth: usize) -> Resolved {
    let text = match value {
        Value::String(text) => text,
        other => return Resolved::Structured(other),
    };

    match sniff_str(&text) {
        ContentFormat::Html => return Resolved::Html(text),
        ContentFormat::Unknown => return Resolved::Text(text),
        ContentFormat::LikelyJson | ContentFormat::StructuredObject => {}
    }
    if depth >= MAX_UNWRAP_DEPTH {
        debug!("Unwrap depth ceiling ({MAX_UNWRAP_DEPTH}) reached; returning text as-is");
        return Resolved::Text(text);
    }

    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::String(inner)) => match sniff_str(&inner) {
            ContentFormat::Html => Resolved::Html(inner),
            ContentFormat::LikelyJson => unwrap_at(Value::String(inner), depth + 1),
            _ => Resolved::Text(inner),
        },
        Ok(structured) => Resolved::Structured(structured),
        Err(e) => {
            debug!("Content is not valid JSON at depth {depth}: {e}");
            if is_html(&text) {
                Resolved::Html(text)
            } else {
                Resolved::Text(text)
            }
        }
    }
}
