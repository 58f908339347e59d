//! Handler that captures group messages into the Message Store in before().

use std::sync::Arc;

use async_trait::async_trait;
use digest_core::{Handler, Message, Result};
use storage::MessageStore;
use tracing::{debug, error, info, instrument};

use crate::capture::{should_capture, to_new_message};

/// Appends capturable messages to the store; always continues, even when the append fails.
#[derive(Clone)]
pub struct PersistenceHandler {
    store: Arc<dyn MessageStore>,
}

impl PersistenceHandler {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for PersistenceHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if !should_capture(message) {
            debug!(chat_kind = %message.chat.kind, "step: message not captured");
            return Ok(true);
        }

        match self.store.append(&to_new_message(message)).await {
            Ok(id) => info!(id = id, "step: message captured"),
            Err(e) => error!(error = %e, user_id = message.user.id, "Failed to save message"),
        }
        Ok(true)
    }
}
