//! Wraps teloxide::Bot and implements [`digest_core::Bot`]. Production code sends through Telegram;
//! tests substitute another Bot impl.

use std::path::Path;

use async_trait::async_trait;
use digest_core::{Bot as CoreBot, Chat, DigestError, Result, WindowChoice};
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile},
};
use tracing::{debug, instrument};

/// One button per row, one row per choice, in menu order.
pub fn window_keyboard(choices: &[WindowChoice]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        choices
            .iter()
            .map(|c| vec![InlineKeyboardButton::callback(c.label(), c.payload())]),
    )
}

/// Thin wrapper around teloxide::Bot that implements digest-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn delivery(e: teloxide::RequestError) -> DigestError {
    DigestError::Delivery(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    #[instrument(skip(self, chat, text), fields(chat_id = chat.id))]
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(delivery)?;
        debug!("Message sent");
        Ok(())
    }

    #[instrument(skip(self, chat), fields(chat_id = chat.id, path = %path.display()))]
    async fn send_document(&self, chat: &Chat, path: &Path) -> Result<()> {
        self.bot
            .send_document(ChatId(chat.id), InputFile::file(path.to_path_buf()))
            .await
            .map_err(delivery)?;
        debug!("Document sent");
        Ok(())
    }

    #[instrument(skip(self, chat, prompt, choices), fields(chat_id = chat.id))]
    async fn send_window_menu(
        &self,
        chat: &Chat,
        prompt: &str,
        choices: &[WindowChoice],
    ) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), prompt.to_string())
            .reply_markup(window_keyboard(choices))
            .await
            .map_err(delivery)?;
        Ok(())
    }
}
