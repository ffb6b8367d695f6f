//! Document Normalizer: maps any recognized input shape onto [`ResumeDocument`].
//!
//! Total: every input yields a document. Unrecognized shapes, non-objects and
//! CV records whose payload cannot be resolved all degrade to the empty
//! document rather than erroring.

use serde_json::{Map, Value};
use tracing::debug;

use crate::content::{self, Resolved, MAX_UNWRAP_DEPTH};
use crate::resume::document::{
    Certification, ContactInfo, Education, ExperienceItem, ProjectItem, ResumeDocument,
};
use crate::resume::fields::{
    date_range, first_list, first_text, first_value, month_year, objects, skill_list, technologies,
    text_of,
};
use crate::resume::shapes::{decode_shape, ResumeShape};

/// Prefixes searched (in order) for canonical contact fields. The empty prefix
/// is the top level of the object.
const CONTACT_PREFIXES: &[&str] = &["contactInfo", "personalInfo", ""];

/// Normalizes a resolved structured value.
pub fn normalize(resolved: &Value) -> ResumeDocument {
    normalize_at(resolved, 0)
}

fn normalize_at(value: &Value, depth: usize) -> ResumeDocument {
    let Some(obj) = value.as_object() else {
        debug!("Normalizer received a non-object value; using empty document");
        return ResumeDocument::default();
    };

    match decode_shape(obj) {
        ResumeShape::CvRecord { parsed_resume } => match peel_record(parsed_resume, depth) {
            Some(Resolved::Structured(inner)) => normalize_at(&inner, depth + 1),
            _ => ResumeDocument::default(),
        },
        ResumeShape::Canonical(obj) => from_canonical(obj),
        ResumeShape::FlatProfile(obj) => from_flat_profile(obj),
        ResumeShape::Unrecognized => {
            debug!("Unrecognized resume shape; using empty document");
            ResumeDocument::default()
        }
    }
}

/// If `value` is a CV record envelope whose payload resolves to an HTML
/// document, returns that HTML so the caller can render it directly.
pub fn embedded_html(value: &Value) -> Option<String> {
    let mut current = value.clone();
    for depth in 0..MAX_UNWRAP_DEPTH {
        let obj = current.as_object()?;
        let ResumeShape::CvRecord { parsed_resume } = decode_shape(obj) else {
            return None;
        };
        match peel_record(parsed_resume, depth)? {
            Resolved::Html(html) => return Some(html),
            Resolved::Structured(inner) => current = inner,
            Resolved::Text(_) => return None,
        }
    }
    None
}

/// Resolves the payload of a CV record envelope, bounded by nesting depth.
fn peel_record(parsed_resume: &Value, depth: usize) -> Option<Resolved> {
    if depth >= MAX_UNWRAP_DEPTH {
        debug!("CV record nesting exceeds {MAX_UNWRAP_DEPTH}; giving up");
        return None;
    }
    Some(content::unwrap(parsed_resume.clone()))
}

// ────────────────────────────────────────────────────────────────────────────
// Canonical shape
// ────────────────────────────────────────────────────────────────────────────

fn from_canonical(obj: &Map<String, Value>) -> ResumeDocument {
    let mut name = contact_field(obj, &["name", "fullName"]);
    if name.is_empty() {
        name = CONTACT_PREFIXES
            .iter()
            .map(|prefix| joined_name(obj, prefix))
            .find(|n| !n.is_empty())
            .unwrap_or_default();
    }

    let contact = ContactInfo {
        name,
        email: contact_field(obj, &["email"]),
        phone: contact_field(obj, &["phone", "phoneNumber"]),
        location: contact_field(obj, &["location"]),
        address: contact_field(obj, &["address"]),
        linkedin: contact_field(obj, &["linkedin", "linkedIn", "linkedinUrl"]),
        github: contact_field(obj, &["github", "gitHub", "githubUrl"]),
        portfolio: contact_field(obj, &["portfolio", "website", "portfolioUrl"]),
    };

    ResumeDocument {
        contact,
        summary: first_list(obj, &["professionalSummary", "summary", "objective", "bio"]),
        skills: first_value(obj, &["skills", "technicalSkills"])
            .map(skill_list)
            .unwrap_or_default(),
        experience: objects(first_value(obj, &["experience", "workExperience", "experiences"]))
            .into_iter()
            .map(experience_item)
            .collect(),
        projects: objects(first_value(obj, &["projects", "githubProjects"]))
            .into_iter()
            .map(project_item)
            .collect(),
        education: education(obj),
        certifications: certifications(obj),
    }
}

/// Walks `contactInfo.<key>`, `personalInfo.<key>`, `<key>` for each key variant.
fn contact_field(obj: &Map<String, Value>, keys: &[&str]) -> String {
    let paths: Vec<String> = CONTACT_PREFIXES
        .iter()
        .flat_map(|prefix| {
            keys.iter().map(move |key| {
                if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{prefix}.{key}")
                }
            })
        })
        .collect();
    let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
    first_text(obj, &paths)
}

fn joined_name(obj: &Map<String, Value>, prefix: &str) -> String {
    let scope = if prefix.is_empty() {
        Some(obj)
    } else {
        obj.get(prefix).and_then(Value::as_object)
    };
    scope
        .map(|o| {
            let first = first_text(o, &["firstName"]);
            let last = first_text(o, &["lastName"]);
            format!("{first} {last}").trim().to_string()
        })
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Flat profile shape
// ────────────────────────────────────────────────────────────────────────────

fn from_flat_profile(obj: &Map<String, Value>) -> ResumeDocument {
    let mut name = joined_name(obj, "");
    if name.is_empty() {
        name = first_text(obj, &["name", "fullName"]);
    }

    let contact = ContactInfo {
        name,
        email: first_text(obj, &["email"]),
        phone: first_text(obj, &["phone", "phoneNumber"]),
        location: first_text(obj, &["location", "city"]),
        address: first_text(obj, &["address"]),
        linkedin: first_text(obj, &["linkedin", "linkedIn", "linkedinUrl"]),
        github: first_text(obj, &["github", "githubUrl"]),
        portfolio: first_text(obj, &["portfolio", "portfolioUrl", "website"]),
    };

    ResumeDocument {
        contact,
        summary: obj.get("bio").and_then(text_of).into_iter().collect(),
        skills: obj.get("skills").map(skill_list).unwrap_or_default(),
        experience: objects(obj.get("experiences"))
            .into_iter()
            .map(experience_item)
            .collect(),
        projects: objects(obj.get("githubProjects"))
            .into_iter()
            .map(project_item)
            .collect(),
        education: education(obj),
        certifications: certifications(obj),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section items (shared by both shapes)
// ────────────────────────────────────────────────────────────────────────────

fn experience_item(entry: &Map<String, Value>) -> ExperienceItem {
    let mut range = first_text(entry, &["dateRange", "dates", "duration", "period"]);
    if range.is_empty() {
        let current = entry
            .get("current")
            .or_else(|| entry.get("isCurrent"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        range = date_range(
            &first_text(entry, &["startDate", "start"]),
            &first_text(entry, &["endDate", "end"]),
            current,
        );
    }

    ExperienceItem {
        title: first_text(entry, &["title", "position", "role", "jobTitle"]),
        company: first_text(entry, &["company", "organization", "employer"]),
        location: first_text(entry, &["location"]),
        date_range: range,
        achievements: first_list(
            entry,
            &["achievements", "responsibilities", "highlights", "bullets", "description"],
        ),
    }
}

fn project_item(entry: &Map<String, Value>) -> ProjectItem {
    ProjectItem {
        name: first_text(entry, &["name", "title", "repoName"]),
        technologies: first_value(
            entry,
            &["technologies", "techStack", "tech", "languages", "language"],
        )
        .map(technologies)
        .unwrap_or_default(),
        highlights: first_list(entry, &["highlights", "achievements", "bullets", "description"]),
    }
}

/// First `education` entry. Flat profiles keep the school fields at the top
/// level, where `location` belongs to the person rather than the school.
fn education(obj: &Map<String, Value>) -> Education {
    match objects(obj.get("education")).into_iter().next() {
        Some(entry) => Education {
            location: first_text(entry, &["location"]),
            ..education_fields(entry)
        },
        None => education_fields(obj),
    }
}

fn education_fields(source: &Map<String, Value>) -> Education {
    Education {
        university: first_text(source, &["university", "institution", "school"]),
        major: first_text(source, &["major", "degree", "fieldOfStudy", "field"]),
        graduation_year: first_text(source, &["graduationYear", "graduationDate", "year"]),
        location: String::new(),
    }
}

fn certifications(obj: &Map<String, Value>) -> Vec<Certification> {
    let items = match first_value(obj, &["certifications", "certificates"]) {
        Some(Value::Array(items)) => items.as_slice(),
        Some(single @ Value::Object(_)) => std::slice::from_ref(single),
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(cert) => Some(Certification {
                name: first_text(cert, &["name", "title"]),
                issuer: first_text(
                    cert,
                    &["issuer", "issuingOrganization", "organization", "authority"],
                ),
                date_received: month_year(&first_text(
                    cert,
                    &["dateReceived", "date", "issueDate", "dateIssued"],
                )),
            }),
            other => text_of(other).map(|name| Certification {
                name,
                ..Default::default()
            }),
        })
        .filter(|cert| !cert.name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_contact_name() {
        let doc = normalize(&json!({"contactInfo": {"name": "Ana Cruz"}}));
        assert_eq!(doc.contact.name, "Ana Cruz");
        assert_eq!(doc.contact.email, "");
        assert!(doc.experience.is_empty());
    }

    #[test]
    fn test_flat_profile_scenario() {
        let doc = normalize(&json!({
            "firstName": "Jo",
            "lastName": "Reyes",
            "skills": ["Go"],
            "bio": "Builder."
        }));
        assert_eq!(doc.contact.name, "Jo Reyes");
        assert_eq!(doc.summary, vec!["Builder."]);
        assert_eq!(doc.skills, vec!["Go"]);
    }

    #[test]
    fn test_flat_profile_name_trimmed() {
        let doc = normalize(&json!({"firstName": "Jo", "lastName": ""}));
        assert_eq!(doc.contact.name, "Jo");
    }

    #[test]
    fn test_flat_profile_experiences_and_projects() {
        let doc = normalize(&json!({
            "firstName": "Jo",
            "experiences": [
                {
                    "title": "Intern",
                    "company": "Acme",
                    "startDate": "2023-06-01",
                    "endDate": "2023-09-01",
                    "description": "Built the billing export."
                },
                {"title": "Engineer", "company": "Beta", "startDate": "2024-01"}
            ],
            "githubProjects": [
                {"name": "cvgen", "language": "Rust", "description": "Resume generator."}
            ]
        }));

        assert_eq!(doc.experience.len(), 2);
        assert_eq!(doc.experience[0].date_range, "Jun 2023 - Sep 2023");
        assert_eq!(doc.experience[0].achievements, vec!["Built the billing export."]);
        assert_eq!(doc.experience[1].date_range, "Jan 2024 - Present");
        assert!(doc.experience[1].achievements.is_empty());

        assert_eq!(doc.projects[0].name, "cvgen");
        assert_eq!(doc.projects[0].technologies, "Rust");
        assert_eq!(doc.projects[0].highlights, vec!["Resume generator."]);
    }

    #[test]
    fn test_flat_profile_education_ignores_personal_location() {
        let doc = normalize(&json!({
            "firstName": "Jo",
            "location": "Cebu",
            "university": "UP Diliman",
            "major": "Computer Science",
            "graduationYear": 2025
        }));
        assert_eq!(doc.contact.location, "Cebu");
        assert_eq!(doc.education.university, "UP Diliman");
        assert_eq!(doc.education.graduation_year, "2025");
        assert_eq!(doc.education.location, "");
    }

    #[test]
    fn test_empty_object_yields_default() {
        assert_eq!(normalize(&json!({})), ResumeDocument::default());
    }

    #[test]
    fn test_non_object_yields_default() {
        assert_eq!(normalize(&json!([1, 2, 3])), ResumeDocument::default());
        assert_eq!(normalize(&json!("text")), ResumeDocument::default());
    }

    #[test]
    fn test_cv_record_with_encoded_payload() {
        let inner = json!({"contactInfo": {"name": "Ana Cruz"}, "skills": ["Rust"]});
        let record = json!({
            "id": "cv-9",
            "active": true,
            "parsedResume": Value::String(Value::String(inner.to_string()).to_string())
        });
        let doc = normalize(&record);
        assert_eq!(doc.contact.name, "Ana Cruz");
        assert_eq!(doc.skills, vec!["Rust"]);
    }

    #[test]
    fn test_cv_record_with_html_payload_is_not_normalized() {
        let record = json!({"id": 1, "parsedResume": "<html><body>X</body></html>"});
        assert_eq!(normalize(&record), ResumeDocument::default());
        assert_eq!(
            embedded_html(&record).as_deref(),
            Some("<html><body>X</body></html>")
        );
    }

    #[test]
    fn test_embedded_html_none_for_plain_resume() {
        assert!(embedded_html(&json!({"contactInfo": {"name": "A"}})).is_none());
    }

    #[test]
    fn test_self_nested_records_terminate() {
        let mut value = json!({"contactInfo": {"name": "Deep"}});
        for i in 0..20 {
            value = json!({"id": i, "parsedResume": value});
        }
        assert_eq!(normalize(&value), ResumeDocument::default());
    }

    #[test]
    fn test_canonical_full_mapping() {
        let doc = normalize(&json!({
            "contactInfo": {
                "name": "Ana Cruz",
                "email": "ana@example.com",
                "phone": "+63 900",
                "linkedin": "https://linkedin.com/in/ana"
            },
            "professionalSummary": "Backend engineer.",
            "skills": {"technical": ["Rust", "SQL"], "soft": ["Mentoring"]},
            "experience": [{
                "title": "Engineer",
                "company": "Acme",
                "dateRange": "2021 - 2023",
                "achievements": ["Cut p99 by 40%", "Led migration"]
            }],
            "projects": [{
                "name": "cvgen",
                "technologies": ["Rust", "Axum"],
                "highlights": ["Renders resumes"]
            }],
            "education": {
                "university": "UP Diliman",
                "major": "CS",
                "graduationYear": "2020",
                "location": "Quezon City"
            },
            "certifications": [
                {"name": "CKA", "issuer": "CNCF", "dateReceived": "2022-05-10"},
                "AWS SAA",
                {"issuer": "nameless"}
            ]
        }));

        assert_eq!(doc.contact.email, "ana@example.com");
        assert_eq!(doc.contact.linkedin, "https://linkedin.com/in/ana");
        assert_eq!(doc.summary, vec!["Backend engineer."]);
        assert_eq!(doc.skills, vec!["Rust", "SQL", "Mentoring"]);
        assert_eq!(doc.experience[0].date_range, "2021 - 2023");
        assert_eq!(doc.experience[0].achievements.len(), 2);
        assert_eq!(doc.projects[0].technologies, "Rust, Axum");
        assert_eq!(doc.education.location, "Quezon City");
        assert_eq!(doc.certifications.len(), 2);
        assert_eq!(doc.certifications[0].date_received, "May 2022");
        assert_eq!(doc.certifications[1].name, "AWS SAA");
    }

    #[test]
    fn test_personal_info_fallback_chain() {
        let doc = normalize(&json!({
            "personalInfo": {"firstName": "Lia", "lastName": "Tan", "email": "lia@x.io"},
            "experience": []
        }));
        assert_eq!(doc.contact.name, "Lia Tan");
        assert_eq!(doc.contact.email, "lia@x.io");
    }

    #[test]
    fn test_flat_profile_with_certifications_keeps_bio() {
        let doc = normalize(&json!({
            "firstName": "Jo",
            "lastName": "Reyes",
            "skills": ["Go"],
            "bio": "Builder.",
            "certifications": [{"name": "CKA", "issuer": "CNCF"}]
        }));
        assert_eq!(doc.contact.name, "Jo Reyes");
        assert_eq!(doc.summary, vec!["Builder."]);
        assert_eq!(doc.skills, vec!["Go"]);
        assert_eq!(doc.certifications.len(), 1);
    }

    #[test]
    fn test_flat_profile_with_education_object_keeps_bio() {
        let doc = normalize(&json!({
            "firstName": "Jo",
            "bio": "Builder.",
            "education": {"university": "UP Diliman", "major": "CS"}
        }));
        assert_eq!(doc.summary, vec!["Builder."]);
        assert_eq!(doc.education.university, "UP Diliman");
    }

    #[test]
    fn test_professional_summary_wins_over_bio() {
        let doc = normalize(&json!({
            "professionalSummary": ["Backend engineer."],
            "bio": "Builder."
        }));
        assert_eq!(doc.summary, vec!["Backend engineer."]);
    }

    #[test]
    fn test_list_order_preserved() {
        let doc = normalize(&json!({
            "experience": [
                {"title": "C"}, {"title": "A"}, {"title": "B"}
            ]
        }));
        let titles: Vec<_> = doc.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }
}
