use std::sync::Arc;

use crate::config::Config;
use crate::documents::DocumentExtractor;
use crate::llm_client::LlmProvider;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    /// Structuring collaborator. `LlmClient` in production.
    pub llm: Arc<dyn LlmProvider>,
    /// Extraction collaborator. `PdfExtractor` in production.
    pub extractor: Arc<dyn DocumentExtractor>,
    pub config: Config,
}
