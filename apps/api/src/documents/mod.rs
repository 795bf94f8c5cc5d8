//! Document extraction: turns uploaded document bytes into plain text.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;
pub mod upload;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0} is not a PDF document")]
    NotAPdf(String),

    #[error("no readable text found in {0}")]
    NoText(String),

    #[error("PDF parser failed on {file}: {reason}")]
    Parser { file: String, reason: String },
}

/// One uploaded file as received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn has_pdf_magic(&self) -> bool {
        self.bytes.starts_with(PDF_MAGIC)
    }

    /// Accepted when either the declared type or the leading bytes say PDF.
    pub fn looks_like_pdf(&self) -> bool {
        self.content_type.as_deref() == Some("application/pdf") || self.has_pdf_magic()
    }
}

#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub file_name: String,
    pub text: String,
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, ExtractionError>;
}

/// `pdf-extract` on the blocking pool. Parser panics surface as
/// [`ExtractionError::Parser`] instead of taking the request down.
pub struct PdfExtractor;

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let file = document.file_name.clone();
        if !document.has_pdf_magic() {
            return Err(ExtractionError::NotAPdf(file));
        }

        let bytes = document.bytes.clone();
        let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::Parser {
                file: file.clone(),
                reason: format!("parser task aborted: {e}"),
            })?;

        let raw = result.map_err(|e| ExtractionError::Parser {
            file: file.clone(),
            reason: e.to_string(),
        })?;

        let text = normalize_text(&raw);
        if text.is_empty() {
            return Err(ExtractionError::NoText(file));
        }
        debug!("Extracted {} chars from {file}", text.len());
        Ok(text)
    }
}

/// Trims every line and collapses runs of blank lines.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0;
    for line in raw.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank_run > 0 { "\n\n" } else { "\n" });
        }
        out.push_str(line.trim_start());
        blank_run = 0;
    }
    out
}

/// Extracts every document independently and waits for all of them. The
/// first failure (in upload order) fails the batch.
pub async fn extract_all(
    extractor: Arc<dyn DocumentExtractor>,
    documents: Vec<UploadedDocument>,
) -> Result<Vec<ExtractedDocument>, ExtractionError> {
    let handles: Vec<_> = documents
        .into_iter()
        .map(|document| {
            let extractor = Arc::clone(&extractor);
            tokio::spawn(async move {
                let text = extractor.extract_text(&document).await?;
                Ok::<_, ExtractionError>(ExtractedDocument {
                    file_name: document.file_name,
                    text,
                })
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.map_err(|e| ExtractionError::Parser {
            file: "upload".to_string(),
            reason: format!("extraction task aborted: {e}"),
        }));
    }

    let mut extracted = Vec::with_capacity(results.len());
    for result in results {
        match result? {
            Ok(doc) => extracted.push(doc),
            Err(e) => {
                warn!("Batch extraction failed: {e}");
                return Err(e);
            }
        }
    }
    Ok(extracted)
}
