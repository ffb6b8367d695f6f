use std::sync::Arc;

use crate::generation::generator::ContentGenerator;
use crate::generation::retry::RetryPolicy;
use crate::generation::store::CvStore;
use crate::pdf::PdfExporter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// CV record store. Default: PgCvStore.
    pub store: Arc<dyn CvStore>,
    /// AI generation collaborator. Default: LlmContentGenerator.
    pub generator: Arc<dyn ContentGenerator>,
    /// HTML-to-PDF adapter; `None` when PDF_SERVICE_URL is unset.
    pub pdf: Option<Arc<dyn PdfExporter>>,
    /// Shared content fetch policy.
    pub retry_policy: RetryPolicy,
}
