//! # digest-telegram
//!
//! Telegram layer: adapters, [`digest_core::Bot`] implementation, minimal config, dispatcher.
//! Handles only Telegram connectivity; messages go to the handler chain and menu button presses
//! go to a [`digest_core::SelectionHandler`].

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{core_chat, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{window_keyboard, TelegramBotAdapter};
pub use config::{api_url_from_env, TelegramConfig};
pub use runner::run_dispatcher;
