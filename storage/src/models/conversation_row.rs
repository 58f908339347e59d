//! Projection returned by window queries.

/// `(chat, title, text)` projection of one stored message; the only read shape the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ConversationRow {
    pub chat_id: i64,
    pub chat_title: String,
    pub message_text: String,
}

impl ConversationRow {
    pub fn new(chat_id: i64, chat_title: impl Into<String>, message_text: impl Into<String>) -> Self {
        Self {
            chat_id,
            chat_title: chat_title.into(),
            message_text: message_text.into(),
        }
    }
}
