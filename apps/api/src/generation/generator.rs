//! AI generation collaborator: turns a profile payload into resume content.
//!
//! The returned content's format is not guaranteed (HTML, JSON, or JSON that
//! has been string-encoded one or more times); the render pipeline sorts that
//! out. Generators never retry.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::generation::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The generation endpoint answered 404: a configuration problem.
    #[error("Generation endpoint not found")]
    EndpointNotFound,

    /// Network failure, 5xx, or any other non-404 failure.
    #[error("Generation failed: {0}")]
    Transient(String),
}

impl From<LlmError> for GeneratorError {
    fn from(e: LlmError) -> Self {
        match e.status() {
            Some(404) => GeneratorError::EndpointNotFound,
            _ => GeneratorError::Transient(e.to_string()),
        }
    }
}

/// The generation collaborator trait. Carried in `AppState` as `Arc<dyn ContentGenerator>`.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, record_id: Uuid, profile: &Value) -> Result<Value, GeneratorError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmContentGenerator: default implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmContentGenerator {
    llm: LlmClient,
}

impl LlmContentGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn generate(&self, record_id: Uuid, profile: &Value) -> Result<Value, GeneratorError> {
        let prompt = build_prompt(profile)?;
        info!("Requesting resume content for CV {record_id}");
        let text = self.llm.call_text(&prompt, RESUME_SYSTEM).await?;
        Ok(Value::String(text))
    }
}

fn build_prompt(profile: &Value) -> Result<String, GeneratorError> {
    let profile_json = serde_json::to_string_pretty(profile)
        .map_err(|e| GeneratorError::Transient(format!("Failed to serialize profile: {e}")))?;

    Ok(RESUME_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_SYSTEM)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{profile_json}", &profile_json))
}
