use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn to_llm_message(&self) -> Message {
        match self.role {
            ChatRole::User => Message::user(self.content.clone()),
            ChatRole::Assistant => Message::assistant(self.content.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
    pub category: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(session_id: String, category: &str) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            category: category.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append messages and drop the oldest ones beyond `cap`.
    /// History never starts with an assistant turn.
    pub fn push_capped(&mut self, messages: impl IntoIterator<Item = ChatMessage>, cap: usize) {
        self.messages.extend(messages);
        let mut excess = self.messages.len().saturating_sub(cap);
        while excess < self.messages.len() && self.messages[excess].role == ChatRole::Assistant {
            excess += 1;
        }
        self.messages.drain(..excess);
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub category: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}
