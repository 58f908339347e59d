//! Capture filter and the mapping from core [`Message`] to [`NewMessage`].

use digest_core::Message;
use storage::NewMessage;

/// True for non-command messages from group or supergroup chats.
pub fn should_capture(message: &Message) -> bool {
    message.chat.kind.is_group_like() && !message.is_command()
}

/// Store row for a captured message, with display fallbacks applied.
pub fn to_new_message(message: &Message) -> NewMessage {
    NewMessage {
        user_id: message.user.id,
        username: message.user.display_name(),
        chat_id: message.chat.id,
        chat_title: message.chat.display_title(),
        message_text: message.content().to_string(),
        sent_at: message.sent_at,
        chat_kind: message.chat.kind.as_str().to_string(),
    }
}
