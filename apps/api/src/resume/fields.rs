//! Field lookup helpers shared by the shape decoders.
//!
//! Every lookup walks a priority chain of dotted paths (`"contactInfo.email"`,
//! then `"email"`, ...) and takes the first non-empty value, which absorbs the
//! drift between AI-generated resumes and manually entered profiles.

use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Keys tried, in order, when an array element is an object but a plain
/// label is wanted (e.g. `skills: [{"name": "Rust"}]`).
const LABEL_KEYS: &[&str] = &["name", "title", "label", "skill", "text", "description"];

/// Resolves a dotted path inside an object.
pub fn lookup<'a>(obj: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = obj.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Scalar → trimmed display text. Empty strings, nulls, arrays and objects yield `None`.
pub fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// First non-empty text along the priority chain, or an empty string.
pub fn first_text(obj: &Map<String, Value>, paths: &[&str]) -> String {
    paths
        .iter()
        .filter_map(|path| lookup(obj, path))
        .find_map(text_of)
        .unwrap_or_default()
}

/// First value along the priority chain that is present and not null.
pub fn first_value<'a>(obj: &'a Map<String, Value>, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| lookup(obj, path))
        .find(|v| !v.is_null())
}

/// Coerces a value into an ordered list of non-empty strings.
///
/// - array → each element's text (objects contribute their label)
/// - string → a single entry
pub fn text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(label_of).collect(),
        other => text_of(other).into_iter().collect(),
    }
}

/// First non-empty list along the priority chain.
pub fn first_list(obj: &Map<String, Value>, paths: &[&str]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| lookup(obj, path))
        .map(text_list)
        .find(|list| !list.is_empty())
        .unwrap_or_default()
}

/// Skill lists arrive in many forms: `["Go"]`, `"Go, Rust"`,
/// `{"technical": ["Go"], "soft": ["Writing"]}` or `[{"name": "Go"}]`.
/// All of them flatten to labels in source order.
pub fn skill_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(|c: char| c == ',' || c == '\n')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Value::Array(items) => items.iter().flat_map(skill_list).collect(),
        Value::Object(map) if map.values().all(|v| !v.is_object()) && has_label(map) => {
            label_of(value).into_iter().collect()
        }
        Value::Object(map) => map.values().flat_map(skill_list).collect(),
        other => text_of(other).into_iter().collect(),
    }
}

/// Technologies as a display string: arrays are joined with ", ".
pub fn technologies(value: &Value) -> String {
    match value {
        Value::Array(_) => text_list(value).join(", "),
        other => text_of(other).unwrap_or_default(),
    }
}

/// Accepts an array of objects, or a single object, and yields the objects.
pub fn objects(value: Option<&Value>) -> Vec<&Map<String, Value>> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        Some(Value::Object(map)) => vec![map],
        _ => Vec::new(),
    }
}

fn has_label(map: &Map<String, Value>) -> bool {
    LABEL_KEYS.iter().any(|k| map.contains_key(*k))
}

fn label_of(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => LABEL_KEYS
            .iter()
            .filter_map(|k| map.get(*k))
            .find_map(text_of),
        other => text_of(other),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// Formats a stored date as "Mon YYYY". Accepts `YYYY-MM-DD`, `YYYY-MM`,
/// and RFC 3339 timestamps; anything else (bare years, "Summer 2020") is
/// returned trimmed.
pub fn month_year(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let date_part = raw.split('T').next().unwrap_or(raw);
    let parsed = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{date_part}-01"), "%Y-%m-%d"));

    match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Builds "{start} - {end|Present}". With no start date the range collapses
/// to the end date alone (or nothing).
pub fn date_range(start: &str, end: &str, current: bool) -> String {
    let start = month_year(start);
    let end = if current { String::new() } else { month_year(end) };

    match (start.is_empty(), end.is_empty()) {
        (true, _) => end,
        (false, true) => format!("{start} - Present"),
        (false, false) => format!("{start} - {end}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_priority_chain_prefers_first_path() {
        let o = obj(json!({"contactInfo": {"email": "a@x.com"}, "email": "b@x.com"}));
        assert_eq!(first_text(&o, &["contactInfo.email", "email"]), "a@x.com");
    }

    #[test]
    fn test_priority_chain_skips_empty_and_null() {
        let o = obj(json!({"contactInfo": {"email": "  ", "phone": null}, "email": "b@x.com"}));
        assert_eq!(first_text(&o, &["contactInfo.email", "email"]), "b@x.com");
        assert_eq!(first_text(&o, &["contactInfo.phone", "phone"]), "");
    }

    #[test]
    fn test_numbers_become_text() {
        let o = obj(json!({"graduationYear": 2025}));
        assert_eq!(first_text(&o, &["graduationYear"]), "2025");
    }

    #[test]
    fn test_text_list_from_string_and_array() {
        assert_eq!(text_list(&json!("Shipped it.")), vec!["Shipped it."]);
        assert_eq!(
            text_list(&json!(["a", "", {"text": "b"}, null])),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_skill_list_shapes() {
        assert_eq!(skill_list(&json!("Go, Rust,, SQL")), vec!["Go", "Rust", "SQL"]);
        assert_eq!(
            skill_list(&json!({"technical": ["Go", "Rust"], "soft": ["Writing"]})),
            vec!["Go", "Rust", "Writing"]
        );
        assert_eq!(
            skill_list(&json!([{"name": "Go", "level": "expert"}, "Rust"])),
            vec!["Go", "Rust"]
        );
    }

    #[test]
    fn test_technologies_joined() {
        assert_eq!(technologies(&json!(["Rust", "Axum"])), "Rust, Axum");
        assert_eq!(technologies(&json!("Rust")), "Rust");
    }

    #[test]
    fn test_month_year_formats() {
        assert_eq!(month_year("2023-01-15"), "Jan 2023");
        assert_eq!(month_year("2023-02"), "Feb 2023");
        assert_eq!(month_year("2021-09-01T00:00:00.000Z"), "Sep 2021");
        assert_eq!(month_year("Summer 2020"), "Summer 2020");
        assert_eq!(month_year(""), "");
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(date_range("2022-03", "", false), "Mar 2022 - Present");
        assert_eq!(date_range("2022-03", "2023-06", false), "Mar 2022 - Jun 2023");
        assert_eq!(date_range("2022-03", "2023-06", true), "Mar 2022 - Present");
        assert_eq!(date_range("", "2023-06", false), "Jun 2023");
        assert_eq!(date_range("", "", false), "");
    }
}
