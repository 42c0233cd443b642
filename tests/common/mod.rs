#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use ai_service::config::Config;
use ai_service::llm::{Message, StatelessLLMInterface, TokenStream};
use ai_service::AppState;

/// Language model stand-in that replays canned replies
#[derive(Default)]
pub struct CannedLLM {
    replies: Mutex<VecDeque<String>>,
    pub prompts: Mutex<Vec<Vec<Message>>>,
}

impl CannedLLM {
    pub fn new<const N: usize>(replies: [&str; N]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl StatelessLLMInterface for CannedLLM {
    async fn chat_completion(
        &self,
        messages: Vec<Message>,
        _system: Option<&str>,
    ) -> Result<TokenStream, anyhow::Error> {
        self.prompts.lock().unwrap().push(messages);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("upstream unavailable"))?;
        Ok(Box::new(futures::stream::iter(vec![Ok(reply)])))
    }

    fn provider(&self) -> &str {
        "canned"
    }
}

pub fn test_app(llm: Arc<CannedLLM>) -> Router {
    ai_service::app(AppState::with_llm(Config::default(), llm))
}

pub async fn send(app: &Router, request: Request<Body>) -> (u16, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get(app: &Router, path: &str) -> (u16, Value) {
    send(app, Request::get(path).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, path: &str, body: Value) -> (u16, Value) {
    let request = Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, path: &str) -> (u16, Value) {
    send(app, Request::delete(path).body(Body::empty()).unwrap()).await
}
