use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::candidates::export::{download_response, export_file_name, render_profile_md};
use crate::candidates::filter::{parse_skill_list, CandidateFilter, ExperienceBand};
use crate::candidates::skills::compute_skill_universe;
use crate::candidates::structuring::structure_resume;
use crate::candidates::validation::profile_from_value;
use crate::documents::upload::UploadForm;
use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::models::{CandidateId, CandidateProfile, CandidateRecord};
use crate::state::AppState;
use crate::store;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub location: Option<String>,
}

impl TryFrom<ListQuery> for CandidateFilter {
    type Error = AppError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        Ok(CandidateFilter {
            query: query.q.unwrap_or_default(),
            required_skills: query
                .skills
                .as_deref()
                .map(parse_skill_list)
                .unwrap_or_default(),
            experience: query
                .experience
                .as_deref()
                .unwrap_or_default()
                .parse::<ExperienceBand>()?,
            education: query.education,
            location: query.location.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateRecord>,
    pub total: usize,
    pub matched: usize,
    pub skill_universe: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// POST /api/v1/candidates/extract
/// Extraction then structuring. The preview is not persisted.
pub async fn handle_extract_candidate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CandidateProfile>, AppError> {
    let document = UploadForm::read(multipart).await?.single_document()?;
    let text = state.extractor.extract_text(&document).await?;
    let profile = structure_resume(state.llm.as_ref(), &text).await?;
    Ok(Json(profile))
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<CandidateRecord>), AppError> {
    let profile = profile_from_value(&body).map_err(|e| AppError::Validation(e.to_string()))?;
    let record = state.store.insert(profile).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let filter = CandidateFilter::try_from(query)?;
    let snapshot = state.store.list().await;
    let total = snapshot.len();
    let skill_universe = compute_skill_universe(&snapshot);
    let candidates = filter.apply(snapshot);
    Ok(Json(CandidateListResponse {
        matched: candidates.len(),
        candidates,
        total,
        skill_universe,
    }))
}

/// GET /api/v1/candidates/skills
pub async fn handle_skill_universe(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(compute_skill_universe(&state.store.list().await))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<CandidateId>,
) -> Result<Json<CandidateRecord>, AppError> {
    let record = store::find(state.store.as_ref(), id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(record))
}

/// DELETE /api/v1/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<CandidateId>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/candidates/:id/export
pub async fn handle_export_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<CandidateId>,
    AppQuery(query): AppQuery<ExportQuery>,
) -> Result<Response, AppError> {
    let record = store::find(state.store.as_ref(), id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let response = match query.format.as_deref().map(str::to_lowercase).as_deref() {
        None | Some("json") => {
            let body = serde_json::to_string_pretty(&record).map_err(anyhow::Error::from)?;
            download_response(body, &export_file_name(&record, "json"), "application/json")
        }
        Some("md") | Some("markdown") => download_response(
            render_profile_md(&record),
            &export_file_name(&record, "md"),
            "text/markdown; charset=utf-8",
        ),
        Some(other) => {
            return Err(AppError::Validation(format!(
                "format must be json or md (got '{other}')"
            )))
        }
    };
    info!("Exported candidate {id}");
    Ok(response)
}
