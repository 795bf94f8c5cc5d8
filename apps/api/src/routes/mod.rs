pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::documents::handlers as documents;
use crate::state::AppState;
use crate::tools::handlers as tools;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction preview
        .route(
            "/api/v1/documents/text",
            post(documents::handle_extract_text),
        )
        // Candidate store and views
        .route(
            "/api/v1/candidates",
            get(candidates::handle_list_candidates).post(candidates::handle_create_candidate),
        )
        .route(
            "/api/v1/candidates/extract",
            post(candidates::handle_extract_candidate),
        )
        .route(
            "/api/v1/candidates/skills",
            get(candidates::handle_skill_universe),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate).delete(candidates::handle_delete_candidate),
        )
        .route(
            "/api/v1/candidates/:id/export",
            get(candidates::handle_export_candidate),
        )
        // Multi-resume tools
        .route("/api/v1/tools/compare", post(tools::handle_compare))
        .route("/api/v1/tools/job-match", post(tools::handle_job_match))
        .route(
            "/api/v1/tools/interview-questions",
            post(tools::handle_interview_questions),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
