use std::sync::Arc;
use std::time::Duration;
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::config::LlmConfig;
use super::claude_llm::ClaudeLLM;
use super::openai_compatible_llm::OpenAICompatibleLLM;
use super::stateless_llm_interface::StatelessLLMInterface;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configuration.
    ///
    /// # Arguments
    /// * `config` - LLM section of the service configuration
    pub fn create_llm(config: &LlmConfig) -> Result<Arc<dyn StatelessLLMInterface>> {
        let base_url = Self::resolve_base_url(config)?;
        info!("Initializing LLM: {} ({})", config.provider, base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        match config.provider.as_str() {
            "claude_llm" => Ok(Arc::new(ClaudeLLM::new(
                client,
                config.model.clone(),
                base_url,
                config.api_key.clone(),
                config.temperature,
                config.max_tokens,
            ))),
            _ => Ok(Arc::new(OpenAICompatibleLLM::new(
                client,
                config.provider.clone(),
                config.model.clone(),
                base_url,
                config.api_key.clone(),
                config.temperature,
                config.max_tokens,
            ))),
        }
    }

    /// Configured base URL, or the provider's public endpoint when unset
    pub fn resolve_base_url(config: &LlmConfig) -> Result<String> {
        if let Some(url) = config.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }

        let url = match config.provider.as_str() {
            "openai_compatible_llm" | "openai_llm" => "https://api.openai.com/v1",
            "ollama_llm" => "http://localhost:11434/v1",
            "groq_llm" => "https://api.groq.com/openai/v1",
            "deepseek_llm" => "https://api.deepseek.com/v1",
            "mistral_llm" => "https://api.mistral.ai/v1",
            "claude_llm" => "https://api.anthropic.com/v1",
            _ => return Err(anyhow::anyhow!("Unsupported LLM provider: {}", config.provider)),
        };
        Ok(url.to_string())
    }
}
