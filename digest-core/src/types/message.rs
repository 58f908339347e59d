//! Inbound message as seen by the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// Prefix that marks bot commands; such messages are never captured.
pub const COMMAND_MARKER: char = '/';

/// Text stored for messages without text (media, stickers, service messages).
pub const NON_TEXT_PLACEHOLDER: &str = "(media or empty message)";

/// A single inbound message with sender, chat, optional text and arrival time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub text: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Text, or [`NON_TEXT_PLACEHOLDER`] when the message has none.
    pub fn content(&self) -> &str {
        self.text.as_deref().unwrap_or(NON_TEXT_PLACEHOLDER)
    }

    pub fn is_command(&self) -> bool {
        self.content().starts_with(COMMAND_MARKER)
    }

    /// Command name without the marker and `@botname` suffix (`"/start@digest_bot x"` → `"start"`).
    pub fn command(&self) -> Option<&str> {
        let rest = self.content().strip_prefix(COMMAND_MARKER)?;
        let word = rest.split_whitespace().next()?;
        let name = word.split('@').next().unwrap_or(word);
        (!name.is_empty()).then_some(name)
    }
}
