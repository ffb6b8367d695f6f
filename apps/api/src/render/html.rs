//! HTML Renderer: `ResumeDocument` → self-contained HTML document.
//!
//! Output is deterministic: the same document always produces the same bytes.
//! Every resume value is escaped with `html-escape` before insertion, and the
//! only external reference a document can carry is an `http(s)` profile link.
//!
//! Sections render in a fixed order and only when non-empty:
//! contact header, summary, skills, experience, projects, education, certifications.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::resume::{ContactInfo, Education, ResumeDocument};

const STYLES: &str = r#"
  * { box-sizing: border-box; }
  body { margin: 0; background: #ffffff; color: #1f2933; font-family: "Helvetica Neue", Arial, sans-serif; font-size: 11pt; line-height: 1.45; }
  .resume { max-width: 8.5in; margin: 0 auto; padding: 0.6in 0.7in; }
  header.contact { text-align: center; border-bottom: 2px solid #1f2933; padding-bottom: 10px; margin-bottom: 14px; }
  header.contact h1 { margin: 0 0 4px; font-size: 22pt; letter-spacing: 0.5px; }
  header.contact p { margin: 2px 0; font-size: 10pt; color: #3e4c59; }
  header.contact a { color: #1d4ed8; text-decoration: none; }
  section { margin-bottom: 12px; page-break-inside: avoid; }
  section h2 { margin: 0 0 6px; font-size: 12pt; text-transform: uppercase; letter-spacing: 1px; border-bottom: 1px solid #cbd2d9; padding-bottom: 2px; }
  .entry { margin-bottom: 8px; }
  .entry-head { display: flex; justify-content: space-between; font-weight: bold; }
  .entry-sub { display: flex; justify-content: space-between; font-style: italic; color: #3e4c59; }
  ul { margin: 4px 0 0; padding-left: 18px; }
  li { margin-bottom: 2px; }
  .skills { margin: 0; }
  .summary p { margin: 0 0 4px; }
  pre.plain { white-space: pre-wrap; font-family: inherit; }
"#;

/// Renders a resume document as a complete HTML page.
pub fn render_document(doc: &ResumeDocument) -> String {
    let title = if doc.contact.name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{} - Resume", doc.contact.name)
    };

    let mut body = String::new();
    body.push_str(&contact_header(&doc.contact));
    body.push_str(&summary_section(&doc.summary));
    body.push_str(&skills_section(&doc.skills));
    body.push_str(&experience_section(doc));
    body.push_str(&projects_section(doc));
    body.push_str(&education_section(&doc.education));
    body.push_str(&certifications_section(doc));

    page(&title, &format!("<main class=\"resume\">\n{body}</main>"))
}

/// Wraps unstructured text in a minimal page, preserving line breaks.
pub fn render_plain_text(text: &str) -> String {
    page(
        "Resume",
        &format!(
            "<main class=\"resume\">\n<pre class=\"plain\">{}</pre>\n</main>",
            encode_text(text)
        ),
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLES}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        encode_text(title)
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn contact_header(contact: &ContactInfo) -> String {
    let mut out = format!(
        "<header class=\"contact\">\n<h1>{}</h1>\n",
        encode_text(&contact.name)
    );

    let details = contact.details();
    if !details.is_empty() {
        let joined = details
            .iter()
            .map(|d| encode_text(d).into_owned())
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&format!("<p class=\"details\">{joined}</p>\n"));
    }

    let links = contact.links();
    if !links.is_empty() {
        let joined = links
            .iter()
            .map(|(label, url)| profile_link(label, url))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&format!("<p class=\"links\">{joined}</p>\n"));
    }

    out.push_str("</header>\n");
    out
}

fn summary_section(summary: &[String]) -> String {
    if summary.is_empty() {
        return String::new();
    }
    let paragraphs: String = summary
        .iter()
        .map(|s| format!("<p>{}</p>\n", encode_text(s)))
        .collect();
    section("summary", "Summary", &paragraphs)
}

fn skills_section(skills: &[String]) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let joined = skills
        .iter()
        .map(|s| encode_text(s).into_owned())
        .collect::<Vec<_>>()
        .join(", ");
    section("skills", "Skills", &format!("<p class=\"skills\">{joined}</p>\n"))
}

fn experience_section(doc: &ResumeDocument) -> String {
    if doc.experience.is_empty() {
        return String::new();
    }
    let entries: String = doc
        .experience
        .iter()
        .map(|item| {
            let mut entry = String::from("<div class=\"entry\">\n");
            entry.push_str(&two_column("entry-head", &item.title, &item.date_range));
            entry.push_str(&two_column("entry-sub", &item.company, &item.location));
            entry.push_str(&bullet_list(&item.achievements));
            entry.push_str("</div>\n");
            entry
        })
        .collect();
    section("experience", "Experience", &entries)
}

fn projects_section(doc: &ResumeDocument) -> String {
    if doc.projects.is_empty() {
        return String::new();
    }
    let entries: String = doc
        .projects
        .iter()
        .map(|item| {
            let mut entry = String::from("<div class=\"entry\">\n");
            entry.push_str(&two_column("entry-head", &item.name, ""));
            if !item.technologies.is_empty() {
                entry.push_str(&format!(
                    "<div class=\"entry-sub\"><span>{}</span></div>\n",
                    encode_text(&item.technologies)
                ));
            }
            entry.push_str(&bullet_list(&item.highlights));
            entry.push_str("</div>\n");
            entry
        })
        .collect();
    section("projects", "Projects", &entries)
}

fn education_section(education: &Education) -> String {
    if education.is_empty() {
        return String::new();
    }
    let mut body = String::from("<div class=\"entry\">\n");
    body.push_str(&two_column(
        "entry-head",
        &education.university,
        &education.graduation_year,
    ));
    body.push_str(&two_column("entry-sub", &education.major, &education.location));
    body.push_str("</div>\n");
    section("education", "Education", &body)
}

fn certifications_section(doc: &ResumeDocument) -> String {
    if doc.certifications.is_empty() {
        return String::new();
    }
    let items: Vec<String> = doc
        .certifications
        .iter()
        .map(|cert| {
            [&cert.name, &cert.issuer, &cert.date_received]
                .into_iter()
                .filter(|s| !s.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" - ")
        })
        .collect();
    section("certifications", "Certifications", &bullet_list(&items))
}

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

fn section(class: &str, heading: &str, body: &str) -> String {
    format!("<section class=\"{class}\">\n<h2>{heading}</h2>\n{body}</section>\n")
}

/// Left/right aligned row. Omitted entirely when both sides are empty.
fn two_column(class: &str, left: &str, right: &str) -> String {
    if left.is_empty() && right.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"{class}\"><span>{}</span><span>{}</span></div>\n",
        encode_text(left),
        encode_text(right)
    )
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let lis: String = items
        .iter()
        .map(|item| format!("<li>{}</li>\n", encode_text(item)))
        .collect();
    format!("<ul>\n{lis}</ul>\n")
}

fn profile_link(label: &str, url: &str) -> String {
    match safe_href(url) {
        Some(href) => format!(
            "<a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(&href),
            encode_text(label)
        ),
        None => format!("{}: {}", encode_text(label), encode_text(url)),
    }
}

/// Only `http(s)` targets become links. Scheme-less values such as
/// `github.com/jo` are promoted to `https://`; other schemes are refused.
fn safe_href(url: &str) -> Option<String> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return Some(url.to_string());
    }
    let looks_like_host = !url.contains(':')
        && !url.contains(char::is_whitespace)
        && url.split('/').next().is_some_and(|host| host.contains('.'));
    looks_like_host.then(|| format!("https://{url}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::document::{Certification, ExperienceItem, ProjectItem};

    fn sample() -> ResumeDocument {
        ResumeDocument {
            contact: ContactInfo {
                name: "Ana Cruz".to_string(),
                email: "ana@example.com".to_string(),
                github: "github.com/ana".to_string(),
                ..Default::default()
            },
            summary: vec!["Backend engineer.".to_string()],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            experience: vec![ExperienceItem {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                date_range: "Jan 2022 - Present".to_string(),
                achievements: vec!["Cut p99 latency by 40%".to_string()],
                ..Default::default()
            }],
            projects: vec![ProjectItem {
                name: "cvgen".to_string(),
                technologies: "Rust, Axum".to_string(),
                highlights: vec!["Renders resumes".to_string()],
            }],
            education: Education {
                university: "UP Diliman".to_string(),
                major: "CS".to_string(),
                ..Default::default()
            },
            certifications: vec![],
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_document(&sample()), render_document(&sample().clone()));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let html = render_document(&sample());
        let positions: Vec<usize> = [
            "class=\"contact\"",
            "<h2>Summary</h2>",
            "<h2>Skills</h2>",
            "<h2>Experience</h2>",
            "<h2>Projects</h2>",
            "<h2>Education</h2>",
        ]
        .iter()
        .map(|marker| html.find(marker).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_certifications_omitted() {
        let html = render_document(&sample());
        assert!(!html.contains("Certifications"));
    }

    #[test]
    fn test_certifications_rendered_when_present() {
        let mut doc = sample();
        doc.certifications.push(Certification {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date_received: String::new(),
        });
        let html = render_document(&doc);
        assert!(html.contains("<h2>Certifications</h2>"));
        assert!(html.contains("<li>CKA - CNCF</li>"));
    }

    #[test]
    fn test_empty_document_has_only_contact_header() {
        let html = render_document(&ResumeDocument::default());
        assert!(html.contains("<header class=\"contact\">"));
        assert!(!html.contains("<section"));
        assert!(html.contains("<title>Resume</title>"));
    }

    #[test]
    fn test_field_values_are_escaped() {
        let mut doc = sample();
        doc.contact.name = "<script>alert(1)</script>".to_string();
        doc.skills = vec!["C & <b>C++</b>".to_string()];
        let html = render_document(&doc);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>C++</b>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("C &amp; &lt;b&gt;C++&lt;/b&gt;"));
    }

    #[test]
    fn test_profile_links() {
        let html = render_document(&sample());
        assert!(html.contains("<a href=\"https://github.com/ana\">GitHub</a>"));
    }

    #[test]
    fn test_javascript_url_not_linked() {
        assert_eq!(safe_href("javascript:alert(1)"), None);
        assert_eq!(safe_href("jo reyes"), None);
        assert_eq!(
            safe_href("HTTPS://linkedin.com/in/jo").as_deref(),
            Some("HTTPS://linkedin.com/in/jo")
        );
    }

    #[test]
    fn test_attribute_quotes_escaped() {
        let link = profile_link("Portfolio", "https://jo.dev/\"onmouseover=\"x");
        assert!(!link.contains("\"onmouseover=\""));
    }

    #[test]
    fn test_plain_text_wrapper_escapes() {
        let html = render_plain_text("Jo <Reyes>\nEngineer");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<pre class=\"plain\">Jo &lt;Reyes&gt;\nEngineer</pre>"));
    }
}
