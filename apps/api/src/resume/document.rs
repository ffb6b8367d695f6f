use serde::{Deserialize, Serialize};

/// The canonical, fully-defaulted resume representation used for rendering.
///
/// Every optional field is an empty string or empty list, never absent, so the
/// renderer only ever asks "is this non-empty?". Lists keep source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub contact: ContactInfo,
    pub summary: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub education: Education,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub address: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Pre-formatted display string, e.g. "Jan 2022 - Present".
    pub date_range: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub name: String,
    /// Display string, e.g. "Rust, Postgres".
    pub technologies: String,
    pub highlights: Vec<String>,
}

/// Single education entry; multi-degree resumes keep the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub university: String,
    pub major: String,
    pub graduation_year: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date_received: String,
}

impl ContactInfo {
    /// Secondary header items in display order, skipping empty ones.
    pub fn details(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.location, &self.address]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Profile links as `(label, url)` pairs, skipping empty ones.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("LinkedIn", &self.linkedin),
            ("GitHub", &self.github),
            ("Portfolio", &self.portfolio),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .map(|(label, url)| (label, url.as_str()))
        .collect()
    }
}

impl Education {
    pub fn is_empty(&self) -> bool {
        self.university.is_empty() && self.major.is_empty()
    }
}
