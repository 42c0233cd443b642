use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::VecDeque;
use tracing::{debug, info};

use super::stateless_llm_interface::{Message, StatelessLLMInterface, TokenStream};

/// OpenAI compatible LLM implementation
/// Streams `/chat/completions` over server-sent events
pub struct OpenAICompatibleLLM {
    client: Client,
    provider: String,
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAICompatibleLLM {
    pub fn new(
        client: Client,
        provider: String,
        model: String,
        base_url: String,
        api_key: Option<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: provider={}, model={}, base_url={}",
            provider, model, base_url
        );
        Self {
            client,
            provider,
            model,
            base_url,
            api_key,
            temperature,
            max_tokens,
        }
    }

    fn request_body(&self, messages: Vec<Message>, system: Option<&str>) -> Value {
        let mut service_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(sys) = system {
            service_messages.push(Message {
                role: "system".to_string(),
                content: sys.to_string(),
            });
        }
        service_messages.extend(messages);

        json!({
            "model": self.model,
            "messages": service_messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "stream": true,
        })
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    async fn chat_completion(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
    ) -> Result<TokenStream, anyhow::Error> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!("POST {} ({} messages)", url, messages.len());

        let mut request = self.client.post(&url).json(&self.request_body(messages, system));
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.bearer_auth(key);
        }

        let response = super::ensure_success(request.send().await?).await?;

        let state = SseState {
            inner: Box::pin(response.bytes_stream()),
            buffer: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        };

        let stream = futures::stream::unfold(state, |mut state| async move {
            loop {
                if let Some(item) = state.pending.pop_front() {
                    return Some((item, state));
                }
                if state.done {
                    return None;
                }
                match state.inner.next().await {
                    Some(Ok(chunk)) => {
                        state.buffer.extend_from_slice(&chunk);
                        state.drain_lines();
                    }
                    Some(Err(e)) => {
                        state.done = true;
                        return Some((Err(e.into()), state));
                    }
                    None => {
                        state.buffer.push(b'\n');
                        state.drain_lines();
                        state.done = true;
                    }
                }
            }
        });

        Ok(Box::new(Box::pin(stream)))
    }

    fn provider(&self) -> &str {
        &self.provider
    }
}

struct SseState<S> {
    inner: S,
    buffer: Vec<u8>,
    pending: VecDeque<Result<String, anyhow::Error>>,
    done: bool,
}

impl<S> SseState<S> {
    /// Consume every complete line in the buffer. Lines are split on raw bytes so
    /// multi-byte characters spanning two chunks stay intact.
    fn drain_lines(&mut self) {
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if self.done {
                continue;
            }
            let line = String::from_utf8_lossy(&line);
            match parse_sse_line(line.trim()) {
                Ok(Some(SseEvent::Delta(text))) => self.pending.push_back(Ok(text)),
                Ok(Some(SseEvent::Done)) => self.done = true,
                Ok(None) => {}
                Err(e) => {
                    self.pending.push_back(Err(e));
                    self.done = true;
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseEvent {
    Delta(String),
    Done,
}

pub(crate) fn parse_sse_line(line: &str) -> Result<Option<SseEvent>, anyhow::Error> {
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(None);
    };
    let data = data.trim();
    if data == "[DONE]" {
        return Ok(Some(SseEvent::Done));
    }

    let value: Value = serde_json::from_str(data)?;
    if let Some(err) = value.get("error") {
        anyhow::bail!("LLM stream error: {}", err);
    }

    Ok(value
        .pointer("/choices/0/delta/content")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| SseEvent::Delta(s.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_delta_lines() {
        let line = r#"data: {"choices":[{"delta":{"content":"안녕"}}]}"#;
        assert_eq!(
            parse_sse_line(line).unwrap(),
            Some(SseEvent::Delta("안녕".to_string()))
        );
    }

    #[test]
    fn recognises_done_and_ignores_noise() {
        assert_eq!(parse_sse_line("data: [DONE]").unwrap(), Some(SseEvent::Done));
        assert_eq!(parse_sse_line(": keep-alive").unwrap(), None);
        assert_eq!(parse_sse_line("").unwrap(), None);
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#).unwrap(),
            None
        );
    }

    #[test]
    fn surfaces_stream_errors() {
        let err = parse_sse_line(r#"data: {"error":{"message":"rate limited"}}"#).unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn drain_handles_split_chunks() {
        let mut state = SseState {
            inner: (),
            buffer: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        };
        let full = "data: {\"choices\":[{\"delta\":{\"content\":\"면접\"}}]}\n\ndata: [DONE]\n";
        let bytes = full.as_bytes();
        // split inside the multi-byte Hangul sequence
        let split = full.find('면').unwrap() + 1;

        state.buffer.extend_from_slice(&bytes[..split]);
        state.drain_lines();
        assert!(state.pending.is_empty());

        state.buffer.extend_from_slice(&bytes[split..]);
        state.drain_lines();
        assert!(state.done);
        let chunk = state.pending.pop_front().unwrap().unwrap();
        assert_eq!(chunk, "면접");
    }

    #[test]
    fn system_prompt_goes_first() {
        let llm = OpenAICompatibleLLM::new(
            Client::new(),
            "openai_llm".into(),
            "gpt-4o-mini".into(),
            "http://localhost".into(),
            None,
            0.2,
            256,
        );
        let body = llm.request_body(vec![Message::user("hi")], Some("be brief"));
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["stream"], true);
    }
}
