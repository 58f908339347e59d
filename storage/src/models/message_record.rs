//! Insert model for the `messages` table, used by MessageRepository.

use chrono::{DateTime, Utc};

/// A captured message before it is assigned an id. Display fallbacks are already applied.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub user_id: i64,
    pub username: String,
    pub chat_id: i64,
    pub chat_title: String,
    pub message_text: String,
    pub sent_at: DateTime<Utc>,
    pub chat_kind: String,
}
