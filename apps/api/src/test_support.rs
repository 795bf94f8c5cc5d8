//! Fakes for the external collaborators, shared by unit and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::Config;
use crate::documents::{DocumentExtractor, ExtractedDocument, ExtractionError, UploadedDocument};
use crate::llm_client::{LlmError, LlmProvider};
use crate::state::AppState;
use crate::store::{BlobCandidateStore, MemoryBlob};

pub const MULTIPART_BOUNDARY: &str = "hirelens-test-boundary";

/// A model that always gives the same answer, or fails once with a given error.
pub struct ScriptedLlm {
    reply: Option<String>,
    failure: Mutex<Option<LlmError>>,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            failure: Mutex::new(None),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: None,
            failure: Mutex::new(Some(error)),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if let Some(reply) = &self.reply {
            return Ok(reply.clone());
        }
        Err(self
            .failure
            .lock()
            .unwrap()
            .take()
            .unwrap_or(LlmError::EmptyContent))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Treats everything after the `%PDF-` magic as the document text.
pub struct FakeExtractor;

#[async_trait]
impl DocumentExtractor for FakeExtractor {
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let text = document
            .bytes
            .strip_prefix(b"%PDF-".as_slice())
            .ok_or_else(|| ExtractionError::NotAPdf(document.file_name.clone()))?;
        let text = String::from_utf8_lossy(text).trim().to_string();
        if text.is_empty() {
            return Err(ExtractionError::NoText(document.file_name.clone()));
        }
        Ok(text)
    }
}

pub fn pdf_upload(file_name: &str, text: &str) -> UploadedDocument {
    UploadedDocument {
        file_name: file_name.to_string(),
        content_type: Some("application/pdf".to_string()),
        bytes: Bytes::from(format!("%PDF-{text}")),
    }
}

pub fn extracted(file_name: &str, text: &str) -> ExtractedDocument {
    ExtractedDocument {
        file_name: file_name.to_string(),
        text: text.to_string(),
    }
}

/// Memory store, scripted model, fake extractor.
pub fn test_state(llm: ScriptedLlm) -> AppState {
    AppState {
        store: Arc::new(BlobCandidateStore::new(MemoryBlob::default())),
        llm: Arc::new(llm),
        extractor: Arc::new(FakeExtractor),
        config: Config::for_tests(),
    }
}

/// One multipart part: `(field name, file name, content type, body)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str, &'a str);

pub fn multipart_body(parts: &[Part<'_>]) -> String {
    let mut body = String::new();
    for (name, file_name, content_type, content) in parts {
        body.push_str(&format!("--{MULTIPART_BOUNDARY}\r\n"));
        match file_name {
            Some(file_name) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    body
}
