//! Generation Orchestrator: generate → persist → fetch back → render → cache.
//!
//! Stages: Idle → RecordCreated → ContentRequested → ContentFetching →
//!         Rendered → Persisted, with Failed reachable from any of them.
//!
//! Content is read back from the store rather than trusted from the generator
//! response, because the store may re-encode what it is given. If the read
//! keeps failing, the submission held in memory is rendered instead.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::generation::generator::{ContentGenerator, GeneratorError};
use crate::generation::retry::{fetch_content_with_retry, FetchError, RetryPolicy};
use crate::generation::store::{CvStore, StoreError};
use crate::render::{render_content, ContentError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenerationStage {
    Idle,
    RecordCreated,
    ContentRequested,
    ContentFetching,
    Rendered,
    Persisted,
    Failed,
}

/// Where the rendered content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// Read back from the store.
    Stored,
    /// Store reads were exhausted; rendered from the generator's response.
    SubmissionFallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub cv_id: Uuid,
    pub html: String,
    pub source: ContentSource,
    /// Number of store reads made.
    pub attempts: u32,
    /// False when the rendered-HTML cache write failed (non-fatal).
    pub cache_persisted: bool,
    pub stage: GenerationStage,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to create CV record: {0}")]
    RecordCreation(StoreError),

    #[error("Generation endpoint unavailable")]
    EndpointUnavailable { cv_id: Uuid },

    #[error("Generation failed: {message}")]
    TransientFailure { cv_id: Uuid, message: String },

    #[error("Content fetch exhausted after {attempts} attempts")]
    FetchExhausted { cv_id: Uuid, attempts: u32 },

    #[error("Content fetch failed: {source}")]
    FetchFailed { cv_id: Uuid, source: StoreError },

    #[error("No resume content for CV {cv_id}")]
    NoContent { cv_id: Uuid },

    #[error("Generation cancelled")]
    Cancelled { cv_id: Uuid },
}

impl GenerationError {
    /// The stage the request was in when it failed.
    pub fn failed_at(&self) -> GenerationStage {
        match self {
            GenerationError::RecordCreation(_) => GenerationStage::Idle,
            GenerationError::EndpointUnavailable { .. }
            | GenerationError::TransientFailure { .. } => GenerationStage::RecordCreated,
            GenerationError::FetchExhausted { .. }
            | GenerationError::FetchFailed { .. }
            | GenerationError::Cancelled { .. } => GenerationStage::ContentFetching,
            GenerationError::NoContent { .. } => GenerationStage::ContentFetching,
        }
    }
}

pub struct GenerationOrchestrator<'a> {
    store: &'a dyn CvStore,
    generator: &'a dyn ContentGenerator,
    policy: RetryPolicy,
}

impl<'a> GenerationOrchestrator<'a> {
    pub fn new(
        store: &'a dyn CvStore,
        generator: &'a dyn ContentGenerator,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
        }
    }

    /// Runs one generation request end to end.
    pub async fn run(
        &self,
        user_id: Uuid,
        profile: &Value,
        cancel: &CancellationToken,
    ) -> Result<GenerationOutcome, GenerationError> {
        // Idle → RecordCreated. Record creation is not idempotent: no retry.
        let cv_id = self
            .store
            .create_record(user_id)
            .await
            .map_err(GenerationError::RecordCreation)?;
        info!(cv_id = %cv_id, stage = ?GenerationStage::RecordCreated, "CV record created for user {user_id}");

        // RecordCreated → ContentRequested
        let submission = self
            .generator
            .generate(cv_id, profile)
            .await
            .map_err(|e| match e {
                GeneratorError::EndpointNotFound => GenerationError::EndpointUnavailable { cv_id },
                GeneratorError::Transient(message) => {
                    GenerationError::TransientFailure { cv_id, message }
                }
            })?;
        info!(cv_id = %cv_id, stage = ?GenerationStage::ContentRequested, "Generated content received");

        if let Err(e) = self.store.put_content(cv_id, &submission).await {
            warn!(cv_id = %cv_id, "Failed to persist generated content: {e}");
        }

        // ContentRequested → ContentFetching
        info!(cv_id = %cv_id, stage = ?GenerationStage::ContentFetching, "Fetching stored content");
        let (content, source, attempts) =
            match fetch_content_with_retry(self.store, cv_id, self.policy, cancel).await {
                Ok(fetched) => (fetched.content, ContentSource::Stored, fetched.attempts),
                Err(FetchError::Exhausted { attempts, last }) => {
                    if submission.is_null() {
                        return Err(GenerationError::FetchExhausted { cv_id, attempts });
                    }
                    warn!(
                        cv_id = %cv_id,
                        "Content fetch exhausted after {attempts} attempts ({last}); rendering submission"
                    );
                    (submission, ContentSource::SubmissionFallback, attempts)
                }
                Err(FetchError::Fatal(source)) => {
                    return Err(GenerationError::FetchFailed { cv_id, source })
                }
                Err(FetchError::Cancelled { .. }) => return Err(GenerationError::Cancelled { cv_id }),
            };

        // ContentFetching → Rendered
        let html = render_content(Some(&content)).map_err(|e| match e {
            ContentError::NoContent => GenerationError::NoContent { cv_id },
        })?;
        info!(cv_id = %cv_id, stage = ?GenerationStage::Rendered, "Rendered {} bytes of HTML", html.len());

        // Rendered → Persisted. A failed cache write does not fail the request.
        let (cache_persisted, stage) = match self.store.put_rendered_html(cv_id, &html).await {
            Ok(()) => {
                info!(cv_id = %cv_id, stage = ?GenerationStage::Persisted, "Rendered HTML cached");
                (true, GenerationStage::Persisted)
            }
            Err(e) => {
                warn!(cv_id = %cv_id, "Failed to cache rendered HTML: {e}");
                (false, GenerationStage::Rendered)
            }
        };

        Ok(GenerationOutcome {
            cv_id,
            html,
            source,
            attempts,
            cache_persisted,
            stage,
        })
    }
}
