// Prompt constants for resume generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume generation.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer for students and early-career \
    engineers. You turn structured profile data into a concise, one-page resume.";

/// Resume generation prompt. Replace `{json_only}`, `{grounding_instruction}`
/// and `{profile_json}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Write a resume for the candidate described by the profile below.

{json_only}

{grounding_instruction}

Return a JSON object with this EXACT schema (omit nothing; use "" or [] when unknown):
{
  "contactInfo": {
    "name": "", "email": "", "phone": "", "location": "",
    "linkedin": "", "github": "", "portfolio": ""
  },
  "professionalSummary": ["One or two sentences."],
  "skills": ["Rust", "PostgreSQL"],
  "experience": [
    {
      "title": "", "company": "", "location": "",
      "dateRange": "Jan 2023 - Present",
      "achievements": ["Action verb + what + measurable outcome"]
    }
  ],
  "projects": [
    {"name": "", "technologies": "Rust, Axum", "highlights": [""]}
  ],
  "education": {"university": "", "major": "", "graduationYear": "", "location": ""},
  "certifications": [{"name": "", "issuer": "", "dateReceived": ""}]
}

Profile:
{profile_json}
"#;
