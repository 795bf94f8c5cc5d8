//! Resume structuring: resume text in, validated profile out.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::candidates::prompts::{build_structure_prompt, RESUME_STRUCTURE_SYSTEM};
use crate::candidates::validation::profile_from_value;
use crate::llm_client::{call_json, JsonShape, LlmError, LlmProvider};
use crate::models::CandidateProfile;

#[derive(Debug, Error)]
pub enum StructuringError {
    #[error("model API key is not configured")]
    MissingCredential,

    #[error("model response was not a usable candidate record: {0}")]
    Malformed(String),

    #[error("model call failed: {0}")]
    Upstream(String),
}

impl From<LlmError> for StructuringError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingCredential => StructuringError::MissingCredential,
            e if e.is_format_error() => StructuringError::Malformed(e.to_string()),
            e => StructuringError::Upstream(e.to_string()),
        }
    }
}

/// Asks the model for a candidate record and coerces the reply. Nothing is
/// persisted here; the caller shows the result as a preview.
pub async fn structure_resume(
    llm: &dyn LlmProvider,
    resume_text: &str,
) -> Result<CandidateProfile, StructuringError> {
    let prompt = build_structure_prompt(resume_text);
    let value: Value = call_json(llm, &prompt, RESUME_STRUCTURE_SYSTEM, JsonShape::Object).await?;
    let profile =
        profile_from_value(&value).map_err(|e| StructuringError::Malformed(e.to_string()))?;

    if let Some(level) = profile.education_level.as_ref().filter(|l| !l.is_recognized()) {
        debug!("Keeping unrecognized education level '{level}' verbatim");
    }
    info!(
        "Structured resume for {} ({} skills, model {})",
        profile.display_name(),
        profile.skills.len(),
        llm.model_name()
    );
    Ok(profile)
}
