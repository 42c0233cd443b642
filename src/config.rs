use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub chatbot: ChatbotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the language model backend used by translation and chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Defaults to the provider's public endpoint when unset
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "openai_compatible_llm".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

fn default_max_text_length() -> usize {
    5000
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotConfig {
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    #[serde(default = "default_max_history_messages")]
    pub max_history_messages: usize,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_max_message_length() -> usize {
    2000
}

fn default_max_history_messages() -> usize {
    20
}

fn default_max_sessions() -> usize {
    1000
}

fn default_session_ttl_secs() -> u64 {
    3600
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_message_length(),
            max_history_messages: default_max_history_messages(),
            max_sessions: default_max_sessions(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file, expanding `${VAR}` references
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let content = substitute_env_vars(&content);

        let path_lower = path.to_lowercase();
        let config = if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Try each candidate path in order and return the first config that loads.
    /// Falls back to defaults when none of the candidates exist.
    pub fn discover(explicit: Option<&str>) -> Result<(Self, Option<String>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_string())));
        }

        let candidates: Vec<String> = vec![
            std::env::var("AI_SERVICE_CONFIG").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.json".to_string()),
            Some("config/conf.yaml".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover_in(&candidates)
    }

    /// Missing files are skipped; a file that exists but does not load is an error
    pub fn discover_in(candidates: &[String]) -> Result<(Self, Option<String>)> {
        for path in candidates {
            if !Path::new(path).exists() {
                tracing::debug!("No config at {}", path);
                continue;
            }
            let cfg = Self::load(path)
                .with_context(|| format!("Invalid configuration file: {}", path))?;
            return Ok((cfg, Some(path.clone())));
        }

        Ok((Self::default(), None))
    }
}

/// Replace `${VAR_NAME}` with the environment value; unknown variables are left as-is
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
