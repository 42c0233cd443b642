use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ChatbotConfig;
use crate::error::{AppError, AppResult};
use crate::llm::{collect_completion, Message, StatelessLLMInterface};
use super::categories::{find_category, ChatCategory, DEFAULT_CATEGORY};
use super::types::{ChatMessage, ChatRequest, ChatResponse, ChatRole, ChatSession};

/// Career chatbot with in-memory sessions
pub struct ChatbotService {
    llm: Arc<dyn StatelessLLMInterface>,
    config: ChatbotConfig,
    sessions: Arc<DashMap<String, ChatSession>>,
}

impl ChatbotService {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>, config: ChatbotConfig) -> Self {
        Self {
            llm,
            config,
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub async fn chat(&self, request: ChatRequest) -> AppResult<ChatResponse> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::Validation("message must not be empty".to_string()));
        }
        let len = message.chars().count();
        if len > self.config.max_message_length {
            return Err(AppError::Validation(format!(
                "message is too long ({} characters, maximum {})",
                len, self.config.max_message_length
            )));
        }

        let requested_category = match request.category.as_deref() {
            Some(id) => Some(
                find_category(id)
                    .ok_or_else(|| AppError::Validation(format!("Unknown chat category: {}", id)))?,
            ),
            None => None,
        };

        self.expire_sessions();

        // Snapshot history without holding the map guard across the model call
        let (session_id, category, history) = match request.session_id.as_deref() {
            Some(id) => {
                let session = self
                    .sessions
                    .get(id)
                    .ok_or_else(|| AppError::NotFound(format!("Chat session not found: {}", id)))?;
                let category = requested_category
                    .or_else(|| find_category(&session.category))
                    .unwrap_or_else(default_category);
                let history: Vec<Message> =
                    session.messages.iter().map(ChatMessage::to_llm_message).collect();
                (session.session_id.clone(), category, history)
            }
            None => {
                let category = requested_category.unwrap_or_else(default_category);
                let id = Uuid::new_v4().to_string();
                info!("Starting chat session {} ({})", id, category.id);
                (id, category, Vec::new())
            }
        };

        debug!(
            "Chat {}: {} prior messages, category {}",
            session_id,
            history.len(),
            category.id
        );

        let mut messages = history;
        messages.push(Message::user(message));

        let stream = self
            .llm
            .chat_completion(messages, Some(category.system_prompt))
            .await
            .map_err(AppError::Upstream)?;
        let reply = collect_completion(stream).await.map_err(AppError::Upstream)?;
        let reply = reply.trim().to_string();
        if reply.is_empty() {
            return Err(AppError::Upstream(anyhow::anyhow!("model returned an empty reply")));
        }

        let exchange = [
            ChatMessage::new(ChatRole::User, message),
            ChatMessage::new(ChatRole::Assistant, reply.clone()),
        ];
        let cap = self.config.max_history_messages;
        if request.session_id.is_some() {
            // The session may have been deleted while the model was answering
            let mut session = self.sessions.get_mut(&session_id).ok_or_else(|| {
                AppError::NotFound(format!("Chat session not found: {}", session_id))
            })?;
            session.category = category.id.to_string();
            session.push_capped(exchange, cap);
        } else {
            self.make_room();
            let mut session = ChatSession::new(session_id.clone(), category.id);
            session.push_capped(exchange, cap);
            self.sessions.insert(session_id.clone(), session);
        }

        Ok(ChatResponse {
            session_id,
            category: category.id.to_string(),
            response: reply,
            timestamp: Utc::now(),
        })
    }

    pub fn session(&self, session_id: &str) -> AppResult<ChatSession> {
        self.sessions
            .get(session_id)
            .map(|s| s.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("Chat session not found: {}", session_id)))
    }

    pub fn delete_session(&self, session_id: &str) -> AppResult<()> {
        self.sessions
            .remove(session_id)
            .map(|_| info!("Deleted chat session {}", session_id))
            .ok_or_else(|| AppError::NotFound(format!("Chat session not found: {}", session_id)))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop sessions idle for longer than `session_ttl_secs` (0 disables expiry)
    fn expire_sessions(&self) {
        if self.config.session_ttl_secs == 0 {
            return;
        }
        let cutoff = chrono::Duration::from_std(Duration::from_secs(self.config.session_ttl_secs))
            .ok()
            .and_then(|ttl| Utc::now().checked_sub_signed(ttl));
        let Some(cutoff) = cutoff else {
            return;
        };

        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.updated_at >= cutoff);
        let expired = before.saturating_sub(self.sessions.len());
        if expired > 0 {
            debug!("Expired {} idle chat session(s)", expired);
        }
    }

    /// Evict least recently used sessions until a new one fits under `max_sessions`
    fn make_room(&self) {
        let limit = self.config.max_sessions.max(1);
        while self.sessions.len() >= limit {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().updated_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(id) => {
                    self.sessions.remove(&id);
                    info!("Evicted chat session {} (limit {})", id, limit);
                }
                None => break,
            }
        }
    }
}

fn default_category() -> &'static ChatCategory {
    find_category(DEFAULT_CATEGORY).unwrap_or(&super::categories::categories()[0])
}
