use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{call_json, prompts::JSON_ONLY_SYSTEM, JsonShape, LlmProvider};
use crate::tools::aggregation_error;
use crate::tools::prompts::INTERVIEW_QUESTIONS_PROMPT;

pub const QUESTION_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

pub fn build_interview_prompt(job_description: &str) -> String {
    INTERVIEW_QUESTIONS_PROMPT
        .replace("{count}", &QUESTION_COUNT.to_string())
        .replace("{job_description}", job_description)
}

/// Asks for `QUESTION_COUNT` pairs; fewer is accepted, none is a format error.
pub async fn generate_questions(
    llm: &dyn LlmProvider,
    job_description: &str,
) -> Result<Vec<QaPair>, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let prompt = build_interview_prompt(job_description.trim());
    let pairs: Vec<QaPair> = call_json(llm, &prompt, JSON_ONLY_SYSTEM, JsonShape::Array)
        .await
        .map_err(aggregation_error)?;
    if pairs.is_empty() {
        return Err(AppError::StructuringFormat(
            "model returned no interview questions".to_string(),
        ));
    }

    info!("Generated {} interview questions", pairs.len());
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedLlm;

    #[tokio::test]
    async fn test_generates_pairs_from_array_reply() {
        let llm = ScriptedLlm::replying(
            "Sure:\n[{\"question\": \"What is ownership?\", \"answer\": \"Single owner.\"}]",
        );
        let pairs = generate_questions(&llm, "Rust developer").await.unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].question, "What is ownership?");
        assert!(llm.last_prompt().unwrap().contains("Generate 10"));
    }

    #[tokio::test]
    async fn test_empty_array_is_format_error() {
        let llm = ScriptedLlm::replying("[]");
        let err = generate_questions(&llm, "Rust developer").await.unwrap_err();
        assert!(matches!(err, AppError::StructuringFormat(_)));
    }

    #[tokio::test]
    async fn test_object_reply_is_format_error() {
        let llm = ScriptedLlm::replying("{\"question\": \"q\", \"answer\": \"a\"}");
        let err = generate_questions(&llm, "Rust developer").await.unwrap_err();
        assert!(matches!(err, AppError::StructuringFormat(_)));
    }
}
