use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::stateless_llm_interface::{Message, StatelessLLMInterface, TokenStream};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude LLM implementation using the Messages API
pub struct ClaudeLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl ClaudeLLM {
    pub fn new(
        client: Client,
        model: String,
        base_url: String,
        api_key: Option<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        info!("Initialized ClaudeLLM: model={}, base_url={}", model, base_url);
        Self {
            client,
            model,
            base_url,
            api_key,
            temperature,
            max_tokens,
        }
    }

    fn request_body(&self, messages: Vec<Message>, system: Option<&str>) -> Value {
        // Claude takes the system prompt separately and only accepts user/assistant turns
        let messages: Vec<Message> = messages
            .into_iter()
            .filter(|m| m.role == "user" || m.role == "assistant")
            .collect();

        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": messages,
        });
        if let Some(sys) = system {
            body["system"] = Value::String(sys.to_string());
        }
        body
    }
}

/// Concatenate the text blocks of a Messages API response
pub(crate) fn extract_text(response: &Value) -> Result<String, anyhow::Error> {
    let blocks = response
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or_else(|| anyhow::anyhow!("Claude response has no content array"))?;

    Ok(blocks
        .iter()
        .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
        .filter_map(|b| b.get("text").and_then(|t| t.as_str()))
        .collect::<Vec<_>>()
        .join(""))
}

#[async_trait]
impl StatelessLLMInterface for ClaudeLLM {
    async fn chat_completion(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
    ) -> Result<TokenStream, anyhow::Error> {
        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));
        debug!("POST {} ({} messages)", url, messages.len());

        let mut request = self
            .client
            .post(&url)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(messages, system));
        if let Some(key) = self.api_key.as_deref() {
            request = request.header("x-api-key", key);
        }

        let response = super::ensure_success(request.send().await?).await?;
        let value: Value = response.json().await?;
        let text = extract_text(&value)?;

        Ok(Box::new(futures::stream::iter(vec![Ok(text)])))
    }

    fn provider(&self) -> &str {
        "claude_llm"
    }
}
