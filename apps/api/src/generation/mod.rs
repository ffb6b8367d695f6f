// CV generation pipeline.
// Implements: record creation, AI content generation, bounded content
// read-back, rendering, cache persistence, and HTML preview.
// All Anthropic calls go through llm_client via LlmContentGenerator.

pub mod generator;
pub mod handlers;
pub mod orchestrator;
pub mod preview;
pub mod prompts;
pub mod retry;
pub mod store;

#[cfg(test)]
pub mod fakes;
