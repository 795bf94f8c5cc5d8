//! Job matching: resumes scored against one job description by the model.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::ExtractedDocument;
use crate::errors::AppError;
use crate::llm_client::{call_json, prompts::JSON_ONLY_SYSTEM, JsonShape, LlmProvider};
use crate::tools::prompts::JOB_MATCH_PROMPT;
use crate::tools::{aggregation_error, numbered_resumes};

pub const DOWNLOAD_FILE_NAME: &str = "job-matching-results.json";
const MAX_MATCH_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMatch {
    #[serde(default)]
    pub candidate_name: String,
    pub match_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchResult {
    pub analysis: Vec<CandidateMatch>,
    #[serde(default)]
    pub top_candidates: Vec<String>,
    #[serde(default)]
    pub common_gaps: Vec<String>,
    #[serde(default)]
    pub interview_questions: Vec<String>,
}

impl JobMatchResult {
    pub fn validate(&self, resume_count: usize) -> Result<(), String> {
        if self.analysis.len() != resume_count {
            return Err(format!(
                "expected {resume_count} analyses, model returned {}",
                self.analysis.len()
            ));
        }
        if let Some(m) = self
            .analysis
            .iter()
            .find(|m| !(0.0..=MAX_MATCH_SCORE).contains(&m.match_score))
        {
            return Err(format!(
                "match score {} for '{}' is outside 0-100",
                m.match_score, m.candidate_name
            ));
        }
        Ok(())
    }
}

pub fn build_job_match_prompt(job_description: &str, documents: &[ExtractedDocument]) -> String {
    JOB_MATCH_PROMPT
        .replace("{count}", &documents.len().to_string())
        .replace("{resumes}", &numbered_resumes(documents))
        .replace("{job_description}", job_description)
}

pub async fn match_resumes(
    llm: &dyn LlmProvider,
    job_description: &str,
    documents: &[ExtractedDocument],
) -> Result<JobMatchResult, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    if documents.is_empty() {
        return Err(AppError::Validation(
            "Please upload at least one resume".to_string(),
        ));
    }

    let prompt = build_job_match_prompt(job_description, documents);
    let result: JobMatchResult = call_json(llm, &prompt, JSON_ONLY_SYSTEM, JsonShape::Object)
        .await
        .map_err(aggregation_error)?;
    result
        .validate(documents.len())
        .map_err(AppError::StructuringFormat)?;

    info!(
        "Matched {} resumes against job description ({} chars)",
        documents.len(),
        job_description.len()
    );
    Ok(result)
}
