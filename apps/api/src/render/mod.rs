//! Render pipeline: raw stored content → HTML string.
//!
//! raw → sniff → unwrap → (HTML passthrough | normalize → render_document).
//! Strictly sequential and free of I/O; callers own persistence.

pub mod html;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::content::{self, looks_like_json, sniff, Resolved};
use crate::resume::{embedded_html, normalize, ResumeDocument};

pub use html::{render_document, render_plain_text};

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    /// The record holds no content at all (absent, null, or blank).
    #[error("No resume content available")]
    NoContent,
}

/// Resolves and renders raw CV content.
///
/// Content that cannot be recovered into a document (malformed JSON, JSON left
/// over at the unwrap depth ceiling) degrades to the empty document; only
/// missing content is an error.
pub fn render_content(raw: Option<&Value>) -> Result<String, ContentError> {
    let raw = match raw {
        None | Some(Value::Null) => return Err(ContentError::NoContent),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(ContentError::NoContent),
        Some(value) => value,
    };

    debug!("Rendering content classified as {:?}", sniff(raw));

    match content::unwrap(raw.clone()) {
        Resolved::Html(html) => Ok(html),
        Resolved::Structured(value) => {
            if let Some(html) = embedded_html(&value) {
                return Ok(html);
            }
            Ok(render_document(&normalize(&value)))
        }
        Resolved::Text(text) if looks_like_json(&text) => {
            warn!(
                "Malformed resume content ({} bytes); rendering empty document",
                text.len()
            );
            Ok(render_document(&ResumeDocument::default()))
        }
        Resolved::Text(text) => Ok(render_plain_text(&text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_html_rendered_unchanged() {
        let raw = json!("<html><body>X</body></html>");
        assert_eq!(
            render_content(Some(&raw)).unwrap(),
            "<html><body>X</body></html>"
        );
    }

    #[test]
    fn test_double_encoded_json_renders_name() {
        let raw = json!(r#""{\"contactInfo\":{\"name\":\"Ana Cruz\"}}""#);
        let html = render_content(Some(&raw)).unwrap();
        assert!(html.contains("<h1>Ana Cruz</h1>"));
    }

    #[test]
    fn test_flat_profile_renders_sections() {
        let raw = json!({"firstName": "Jo", "lastName": "Reyes", "skills": ["Go"], "bio": "Builder."});
        let html = render_content(Some(&raw)).unwrap();
        assert!(html.contains("<h1>Jo Reyes</h1>"));
        assert!(html.contains("<h2>Summary</h2>"));
        assert!(html.contains("<p class=\"skills\">Go</p>"));
        assert!(!html.contains("<h2>Experience</h2>"));
    }

    #[test]
    fn test_empty_object_renders_only_header() {
        let html = render_content(Some(&json!({}))).unwrap();
        assert_eq!(html, render_document(&ResumeDocument::default()));
        assert!(!html.contains("<section"));
    }

    #[test]
    fn test_missing_content_is_an_error() {
        assert_eq!(render_content(None), Err(ContentError::NoContent));
        assert_eq!(render_content(Some(&Value::Null)), Err(ContentError::NoContent));
        assert_eq!(render_content(Some(&json!("  "))), Err(ContentError::NoContent));
    }

    #[test]
    fn test_malformed_json_degrades_to_empty_document() {
        let raw = json!("{\"contactInfo\": {\"name\": }");
        let html = render_content(Some(&raw)).unwrap();
        assert_eq!(html, render_document(&ResumeDocument::default()));
    }

    #[test]
    fn test_plain_text_wrapped() {
        let html = render_content(Some(&json!("Jo Reyes - Engineer"))).unwrap();
        assert!(html.contains("<pre class=\"plain\">Jo Reyes - Engineer</pre>"));
    }

    #[test]
    fn test_record_envelope_with_html_payload() {
        let raw = json!({
            "id": "cv-1",
            "active": true,
            "parsedResume": "\"<!DOCTYPE html><html><body>Y</body></html>\""
        });
        assert_eq!(
            render_content(Some(&raw)).unwrap(),
            "<!DOCTYPE html><html><body>Y</body></html>"
        );
    }
}
