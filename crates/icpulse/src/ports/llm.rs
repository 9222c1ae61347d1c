//! LLM Provider Port
//!
//! Abstract interface for chat-completion calls so handlers can be tested
//! against a fake provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::HandlerError;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Response from a completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

/// Chat-completion provider interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion from messages.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResponse, HandlerError>;

    /// Generate a completion from a single prompt.
    async fn complete_simple(&self, prompt: &str) -> Result<String, HandlerError> {
        let messages = vec![ChatMessage::user(prompt)];
        Ok(self.complete(&messages).await?.content)
    }

    /// Provider name for logging (e.g. "groq").
    fn provider_name(&self) -> &str;
}
