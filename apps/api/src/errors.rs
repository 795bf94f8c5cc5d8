use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::candidates::structuring::StructuringError;
use crate::documents::ExtractionError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every collaborator failure ends here as a dismissible message; none is
/// retried automatically.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Structuring error: {0}")]
    Structuring(#[from] StructuringError),

    #[error("Structuring format error: {0}")]
    StructuringFormat(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("Rejected oversized upload: {msg}");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "PAYLOAD_TOO_LARGE",
                    "Upload exceeds the size limit".to_string(),
                )
            }
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    format!("Failed to extract text from PDF: {e}"),
                )
            }
            AppError::Structuring(StructuringError::MissingCredential) => {
                tracing::error!("Structuring error: model API key is not configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STRUCTURING_ERROR",
                    "API key not configured".to_string(),
                )
            }
            AppError::Structuring(e) => {
                tracing::error!("Structuring error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "STRUCTURING_ERROR",
                    "Failed to generate structured summary. Please try again.".to_string(),
                )
            }
            AppError::StructuringFormat(msg) => {
                tracing::error!("Structuring format error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "STRUCTURING_FORMAT_ERROR",
                    "The analysis could not be completed. Please try again.".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Error saving profile. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
