//! Tagged-variant decode of the resume input shapes we recognize.
//!
//! Each matcher is a pure `fn(&Map) -> Option<ResumeShape>`; [`decode_shape`]
//! runs them in priority order and the first match wins. Anything that no
//! matcher claims is [`ResumeShape::Unrecognized`].

use serde_json::{Map, Value};

/// Keys that only appear in canonical (AI-generated) resume JSON.
const CANONICAL_KEYS: &[&str] = &[
    "contactInfo",
    "personalInfo",
    "professionalSummary",
    "summary",
    "experience",
    "workExperience",
    "projects",
    "education",
    "certifications",
];

/// Keys that only appear in flat onboarding profiles.
const FLAT_PROFILE_KEYS: &[&str] = &["firstName", "lastName", "experiences", "githubProjects", "bio"];

#[derive(Debug, Clone, PartialEq)]
pub enum ResumeShape<'a> {
    /// A full CV record envelope; the resume lives (possibly re-encoded) in `parsedResume`.
    CvRecord { parsed_resume: &'a Value },
    /// Canonical resume JSON: `contactInfo`, `professionalSummary`, `experience`, ...
    Canonical(&'a Map<String, Value>),
    /// Flat profile: `firstName`, `lastName`, `skills: []`, `experiences`, `githubProjects`, `bio`.
    FlatProfile(&'a Map<String, Value>),
    Unrecognized,
}

type ShapeMatcher = for<'a> fn(&'a Map<String, Value>) -> Option<ResumeShape<'a>>;

/// Matchers in priority order.
const MATCHERS: &[ShapeMatcher] = &[match_cv_record, match_canonical, match_flat_profile];

pub fn decode_shape(obj: &Map<String, Value>) -> ResumeShape<'_> {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(obj))
        .unwrap_or(ResumeShape::Unrecognized)
}

/// Requires `parsedResume` plus the record `id`; `active` is optional.
pub fn match_cv_record(obj: &Map<String, Value>) -> Option<ResumeShape<'_>> {
    let parsed_resume = present(obj, "parsedResume")?;
    present(obj, "id")?;
    Some(ResumeShape::CvRecord { parsed_resume })
}

/// Any canonical-only key, or a bare `skills` list with no profile keys.
pub fn match_canonical(obj: &Map<String, Value>) -> Option<ResumeShape<'_>> {
    let has_canonical = CANONICAL_KEYS.iter().any(|k| present(obj, k).is_some());
    let bare_skills = present(obj, "skills").is_some() && !has_any(obj, FLAT_PROFILE_KEYS);
    (has_canonical || bare_skills).then_some(ResumeShape::Canonical(obj))
}

pub fn match_flat_profile(obj: &Map<String, Value>) -> Option<ResumeShape<'_>> {
    has_any(obj, FLAT_PROFILE_KEYS).then_some(ResumeShape::FlatProfile(obj))
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn has_any(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|k| present(obj, k).is_some())
}
