use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::documents::UploadedDocument;
use crate::errors::AppError;

/// Parts of a multipart form: every file part plus plain text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub documents: Vec<UploadedDocument>,
    pub fields: HashMap<String, String>,
}

/// Body-limit failures are 413; everything else is a malformed request.
fn multipart_error(e: MultipartError, context: String) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {e}"))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

impl UploadForm {
    /// Drains a multipart body. Parts with a filename are documents and must
    /// look like PDFs; other parts are read as text fields.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Malformed multipart body".to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(String::from);
            let content_type = field.content_type().map(String::from);

            match file_name {
                Some(file_name) => {
                    let bytes = field.bytes().await.map_err(|e| {
                        multipart_error(e, format!("Failed to read upload '{file_name}'"))
                    })?;
                    let document = UploadedDocument {
                        file_name,
                        content_type,
                        bytes,
                    };
                    if !document.looks_like_pdf() {
                        return Err(AppError::Validation(format!(
                            "'{}' is not a PDF. Please select a valid PDF file.",
                            document.file_name
                        )));
                    }
                    form.documents.push(document);
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, format!("Failed to read field '{name}'")))?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Exactly one document, for single-resume routes.
    pub fn single_document(mut self) -> Result<UploadedDocument, AppError> {
        match self.documents.len() {
            0 => Err(AppError::Validation("A PDF file is required".to_string())),
            1 => Ok(self.documents.remove(0)),
            n => Err(AppError::Validation(format!(
                "Expected one PDF file, got {n}"
            ))),
        }
    }

    /// A text field that must be present and non-blank.
    pub fn required_field(&self, name: &str) -> Result<&str, AppError> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation(format!("{name} cannot be empty")))
    }
}
