//! Comparison Aggregation: 2+ resumes, one model call, one result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::ExtractedDocument;
use crate::errors::AppError;
use crate::llm_client::{call_json, prompts::JSON_ONLY_SYSTEM, JsonShape, LlmProvider};
use crate::tools::prompts::COMPARISON_PROMPT;
use crate::tools::{aggregation_error, numbered_resumes};

pub const MIN_RESUMES: usize = 2;
pub const DOWNLOAD_FILE_NAME: &str = "resume-comparison-results.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSplit {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedCandidate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: SkillSplit,
    /// Years, as reported by the model.
    #[serde(default)]
    pub experience: Option<f64>,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    #[serde(default)]
    pub skills_overlap: Vec<String>,
    #[serde(default)]
    pub unique_skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub experience_comparison: String,
    pub ranking: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub candidates: Vec<ComparedCandidate>,
    pub comparison: ComparisonSummary,
}

impl ComparisonResult {
    /// Shape checks only. Rankings are reported as the model gave them.
    pub fn validate(&self, resume_count: usize) -> Result<(), String> {
        if self.candidates.len() != resume_count {
            return Err(format!(
                "expected {resume_count} candidates, model returned {}",
                self.candidates.len()
            ));
        }
        if self.comparison.ranking.is_empty() {
            return Err("comparison ranking is empty".to_string());
        }
        if let Some(years) = self
            .candidates
            .iter()
            .filter_map(|c| c.experience)
            .find(|y| !y.is_finite() || *y < 0.0)
        {
            return Err(format!("invalid years of experience: {years}"));
        }
        Ok(())
    }
}

pub fn build_comparison_prompt(documents: &[ExtractedDocument]) -> String {
    COMPARISON_PROMPT
        .replace("{count}", &documents.len().to_string())
        .replace("{resumes}", &numbered_resumes(documents))
}

pub async fn compare_resumes(
    llm: &dyn LlmProvider,
    documents: &[ExtractedDocument],
) -> Result<ComparisonResult, AppError> {
    if documents.len() < MIN_RESUMES {
        return Err(AppError::Validation(format!(
            "Please upload at least {MIN_RESUMES} resumes to compare"
        )));
    }

    let prompt = build_comparison_prompt(documents);
    let result: ComparisonResult = call_json(llm, &prompt, JSON_ONLY_SYSTEM, JsonShape::Object)
        .await
        .map_err(aggregation_error)?;
    result
        .validate(documents.len())
        .map_err(AppError::StructuringFormat)?;

    info!(
        "Compared {} resumes, ranking: {}",
        documents.len(),
        result.comparison.ranking.join(" > ")
    );
    Ok(result)
}
