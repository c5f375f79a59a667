//! TextGenerator trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core to decouple the review
//! pipeline from the specific LLM library. The model is treated as a
//! capability: given a persona and a prompt, it returns a text blob; the
//! suggestion validator is the only defense against what comes back.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

pub use rig::RigGenerator;

/// Errors from the text generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// One completion request: persona, prompt, and sampling parameters.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    /// System persona for the call.
    pub system: &'a str,
    /// User prompt.
    pub user: &'a str,
    /// Model identifier, provider-specific.
    pub model: &'a str,
    /// Completion token budget.
    pub max_tokens: u64,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Trait for LLM-backed text generation.
///
/// Implementations handle client construction and the provider call;
/// they do not interpret the response.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a single text completion.
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, GeneratorError>;
}
