// Multi-resume tools. Every result here comes straight from the model:
// the shape is validated, the scores and rankings are not recomputed.

pub mod comparison;
pub mod handlers;
pub mod interview;
pub mod job_match;
pub mod prompts;

use crate::candidates::structuring::StructuringError;
use crate::documents::ExtractedDocument;
use crate::errors::AppError;
use crate::llm_client::LlmError;

/// Format failures become `StructuringFormat` so no partial result is shown;
/// everything else is an ordinary structuring failure.
pub fn aggregation_error(e: LlmError) -> AppError {
    if e.is_format_error() {
        AppError::StructuringFormat(e.to_string())
    } else {
        AppError::Structuring(StructuringError::from(e))
    }
}

/// `RESUME 1 (file name):` … blocks, in upload order.
pub fn numbered_resumes(documents: &[ExtractedDocument]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            format!("\n\nRESUME {} ({}):\n{}", i + 1, doc.file_name, doc.text)
        })
        .collect()
}
