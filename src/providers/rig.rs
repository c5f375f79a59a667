//! rig-core integration for LLM-backed text generation.
//!
//! Uses rig-core's provider clients for multi-provider support:
//! Anthropic, OpenAI, Gemini, Groq, and any OpenAI-compatible API.
//! Each call is a single completion; there is no tool use and no
//! multi-turn loop.

use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;

use crate::config::ProviderConfig;
use crate::models::ProviderName;

use super::{GenerationRequest, GeneratorError, TextGenerator};

/// Build an agent from a rig-core client and prompt it.
///
/// Always sets `max_tokens`: all rig-core providers support it and
/// without it some (e.g. Gemini) default to a low limit that truncates
/// responses.
macro_rules! prompt_text {
    ($client:expr, $req:expr, $label:expr) => {{
        let agent = $client
            .agent($req.model)
            .preamble($req.system)
            .temperature($req.temperature)
            .max_tokens($req.max_tokens)
            .build();
        agent
            .prompt($req.user)
            .await
            .map_err(|e| GeneratorError::ApiError(format!("{} API error: {e}", $label)))
    }};
}

/// Create a rig-core client using the `Client::new(api_key)` convention.
macro_rules! new_client {
    ($provider_mod:path, $api_key:expr, $label:expr) => {{
        <$provider_mod>::new($api_key).map_err(|e| {
            GeneratorError::ApiError(format!("failed to create {} client: {e}", $label))
        })
    }};
}

/// rig-core based text generator.
///
/// The provider name in config selects which rig-core client to use.
#[derive(Debug)]
pub struct RigGenerator {
    config: ProviderConfig,
}

impl RigGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, GeneratorError> {
        if config.api_key.is_none() {
            return Err(GeneratorError::NotConfigured(format!(
                "no API key found for provider '{}'. Set {} or the provider-specific env var.",
                config.name,
                crate::constants::ENV_API_KEY
            )));
        }
        Ok(Self { config })
    }

    /// Build an OpenAI-style client, optionally with a custom base URL.
    fn build_openai_client(
        &self,
        api_key: &str,
    ) -> Result<providers::openai::CompletionsClient, GeneratorError> {
        let mut builder = providers::openai::CompletionsClient::builder().api_key(api_key);
        if let Some(ref base_url) = self.config.base_url {
            builder = builder.base_url(base_url);
        }
        let client: providers::openai::CompletionsClient = builder.build().map_err(|e| {
            GeneratorError::ApiError(format!("failed to create OpenAI client: {e}"))
        })?;
        Ok(client)
    }

    /// Require `base_url` for OpenAI-compatible providers.
    fn require_base_url(&self) -> Result<&str, GeneratorError> {
        self.config.base_url.as_deref().ok_or_else(|| {
            GeneratorError::NotConfigured(
                "openai-compatible provider requires base_url to be set".to_string(),
            )
        })
    }

    /// Get the API key or return an error.
    fn api_key(&self) -> Result<&str, GeneratorError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| GeneratorError::NotConfigured("missing API key".to_string()))
    }
}

#[async_trait::async_trait]
impl TextGenerator for RigGenerator {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, GeneratorError> {
        let api_key = self.api_key()?;

        match self.config.name {
            ProviderName::Anthropic => {
                let client: providers::anthropic::Client = providers::anthropic::Client::builder()
                    .api_key(api_key)
                    .build()
                    .map_err(|e| {
                        GeneratorError::ApiError(format!("failed to create Anthropic client: {e}"))
                    })?;
                prompt_text!(client, request, "Anthropic")
            }
            ProviderName::OpenAI => {
                let client = self.build_openai_client(api_key)?;
                prompt_text!(client, request, "OpenAI")
            }
            ProviderName::Gemini => {
                let client = new_client!(providers::gemini::Client, api_key, "Gemini")?;
                prompt_text!(client, request, "Gemini")
            }
            ProviderName::Groq => {
                let client = new_client!(providers::groq::Client, api_key, "Groq")?;
                prompt_text!(client, request, "Groq")
            }
            ProviderName::OpenAICompatible => {
                let base_url = self.require_base_url()?;
                let client: providers::openai::CompletionsClient =
                    providers::openai::CompletionsClient::builder()
                        .api_key(api_key)
                        .base_url(base_url)
                        .build()
                        .map_err(|e| {
                            GeneratorError::ApiError(format!(
                                "failed to create OpenAI-compatible client: {e}"
                            ))
                        })?;
                prompt_text!(client, request, "OpenAI-compatible")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: ProviderName, api_key: Option<&str>, base_url: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            name,
            api_key: api_key.map(String::from),
            base_url: base_url.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn new_requires_api_key() {
        let result = RigGenerator::new(config(ProviderName::Anthropic, None, None));
        assert!(matches!(result, Err(GeneratorError::NotConfigured(_))));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("anthropic"));
        assert!(err.contains("PRVET_API_KEY"));
    }

    #[test]
    fn new_accepts_configured_provider() {
        let generator = RigGenerator::new(config(ProviderName::OpenAI, Some("sk-test"), None));
        assert!(generator.is_ok());
    }

    #[tokio::test]
    async fn openai_compatible_requires_base_url() {
        let generator =
            RigGenerator::new(config(ProviderName::OpenAICompatible, Some("sk-test"), None))
                .unwrap();
        let request = GenerationRequest {
            system: "persona",
            user: "prompt",
            model: "local-model",
            max_tokens: 10,
            temperature: 0.0,
        };
        let result = generator.generate(request).await;
        assert!(matches!(result, Err(GeneratorError::NotConfigured(_))));
    }
}
