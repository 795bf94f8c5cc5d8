use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::candidates::export::download_response;
use crate::documents::{extract_all, upload::UploadForm};
use crate::errors::AppError;
use crate::extractors::{AppJson, AppQuery};
use crate::state::AppState;
use crate::tools::comparison::{self, compare_resumes};
use crate::tools::interview::{generate_questions, QaPair};
use crate::tools::job_match::{self, match_resumes};

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub download: bool,
}

#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    pub job_description: String,
}

fn respond<T: Serialize>(
    value: &T,
    download: bool,
    file_name: &str,
) -> Result<Response, AppError> {
    if download {
        let body = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
        Ok(download_response(body, file_name, "application/json"))
    } else {
        Ok(Json(value).into_response())
    }
}

/// POST /api/v1/tools/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DownloadQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = UploadForm::read(multipart).await?;
    if form.documents.len() < comparison::MIN_RESUMES {
        return Err(AppError::Validation(format!(
            "Please upload at least {} resumes to compare",
            comparison::MIN_RESUMES
        )));
    }
    let documents = extract_all(state.extractor.clone(), form.documents).await?;
    let result = compare_resumes(state.llm.as_ref(), &documents).await?;
    respond(&result, params.download, comparison::DOWNLOAD_FILE_NAME)
}

/// POST /api/v1/tools/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DownloadQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = UploadForm::read(multipart).await?;
    let job_description = form.required_field("job_description")?.to_string();
    if form.documents.is_empty() {
        return Err(AppError::Validation(
            "Please upload at least one resume".to_string(),
        ));
    }
    let documents = extract_all(state.extractor.clone(), form.documents).await?;
    let result = match_resumes(state.llm.as_ref(), &job_description, &documents).await?;
    respond(&result, params.download, job_match::DOWNLOAD_FILE_NAME)
}

/// POST /api/v1/tools/interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    AppJson(req): AppJson<InterviewRequest>,
) -> Result<Json<Vec<QaPair>>, AppError> {
    let pairs = generate_questions(state.llm.as_ref(), &req.job_description).await?;
    Ok(Json(pairs))
}
