use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::documents::upload::UploadForm;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub file_name: String,
    pub text: String,
}

/// POST /api/v1/documents/text
pub async fn handle_extract_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let document = UploadForm::read(multipart).await?.single_document()?;
    let text = state.extractor.extract_text(&document).await?;
    Ok(Json(ExtractTextResponse {
        file_name: document.file_name,
        text,
    }))
}
