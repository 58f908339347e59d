//! Persistence models for captured messages.

mod conversation_row;
mod message_record;

pub use conversation_row::ConversationRow;
pub use message_record::NewMessage;
