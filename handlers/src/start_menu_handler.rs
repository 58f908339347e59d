//! Handler for `/start`: presents the window menu.

use std::sync::Arc;

use async_trait::async_trait;
use digest_core::{DigestError, Handler, HandlerError, HandlerResponse, Message, Result};
use pipeline::TriggerSurface;
use tracing::{info, instrument, warn};

pub const START_COMMAND: &str = "start";

pub struct StartMenuHandler {
    trigger: Arc<TriggerSurface>,
}

impl StartMenuHandler {
    pub fn new(trigger: Arc<TriggerSurface>) -> Self {
        Self { trigger }
    }
}

#[async_trait]
impl Handler for StartMenuHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some(START_COMMAND) {
            return Ok(HandlerResponse::Continue);
        }
        info!(user_id = message.user.id, "step: /start received");
        match self.trigger.present_menu(&message.chat, &message.user).await {
            Ok(()) => Ok(HandlerResponse::Stop),
            Err(DigestError::Handler(HandlerError::Unauthorized)) => {
                warn!(user_id = message.user.id, "/start from non-administrator ignored");
                Ok(HandlerResponse::Stop)
            }
            Err(e) => Err(e),
        }
    }
}
