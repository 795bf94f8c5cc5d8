// Candidate module LLM prompt templates.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};

pub const RESUME_STRUCTURE_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Replace `{resume_text}` and `{no_invention}` before sending.
pub const RESUME_STRUCTURE_PROMPT: &str = r#"Analyze this resume and return a single JSON object with these EXACT keys:
{
  "name": string | null,
  "contactInfo": string | null,
  "skills": [string],
  "experience": [string],
  "education": [string],
  "projects": [string],
  "yearsOfExperience": number | null,
  "educationLevel": "highschool" | "bachelors" | "masters" | "phd" | null,
  "location": string | null
}

Rules:
- "experience", "education" and "projects" hold one short line per entry, in resume order.
- "yearsOfExperience" is total professional experience in years.
- "educationLevel" is the highest completed level.
- {no_invention}

Resume text:
{resume_text}"#;

pub fn build_structure_prompt(resume_text: &str) -> String {
    RESUME_STRUCTURE_PROMPT
        .replace("{no_invention}", NO_INVENTION_INSTRUCTION)
        .replace("{resume_text}", resume_text)
}
