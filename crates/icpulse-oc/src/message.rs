//! Chat message construction
//!
//! Messages carry two lifecycle flags: `finalised` (no further edits allowed
//! once set) and `ephemeral` (visible only to the invoking user; returned in
//! the response envelope but never pushed to the gateway). A handler may
//! create a provisional message with `finalised = false` and later replace it
//! with a finalised one under the same id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message body kinds the bot produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageContent {
    Text { text: String },
}

/// An outbound chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: MessageContent,
    pub finalised: bool,
    pub ephemeral: bool,
    pub block_level_markdown: bool,
}

impl Message {
    /// A finalised, shared text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: MessageContent::Text { text: text.into() },
            finalised: true,
            ephemeral: false,
            block_level_markdown: true,
        }
    }

    /// An ephemeral text message, visible only to the invoking user.
    pub fn ephemeral_text(text: impl Into<String>) -> Self {
        Self {
            ephemeral: true,
            ..Self::text(text)
        }
    }

    /// Override the finalised flag (provisional messages pass `false`).
    pub fn with_finalised(mut self, finalised: bool) -> Self {
        self.finalised = finalised;
        self
    }

    /// The finalised replacement for a provisional message, keeping its id.
    pub fn finalise_with(&self, text: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            content: MessageContent::Text { text: text.into() },
            finalised: true,
            ephemeral: self.ephemeral,
            block_level_markdown: self.block_level_markdown,
        }
    }

    pub fn text_content(&self) -> &str {
        match &self.content {
            MessageContent::Text { text } => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_message_is_finalised_and_shared() {
        let msg = Message::text("hello");
        assert!(msg.finalised);
        assert!(!msg.ephemeral);
        assert_eq!(msg.text_content(), "hello");
    }

    #[test]
    fn ephemeral_message_keeps_text() {
        let msg = Message::ephemeral_text("only you can see this");
        assert!(msg.ephemeral);
        assert!(msg.finalised);
    }

    #[test]
    fn finalise_keeps_message_id() {
        let provisional = Message::text("Working on it...").with_finalised(false);
        assert!(!provisional.finalised);

        let replacement = provisional.finalise_with("Done");
        assert_eq!(replacement.id, provisional.id);
        assert!(replacement.finalised);
        assert_eq!(replacement.text_content(), "Done");
    }
}
