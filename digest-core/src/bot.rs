//! Bot abstraction for delivering notices, documents and the window menu.
//!
//! [`Bot`] is transport-agnostic; digest-telegram implements it via teloxide and tests substitute
//! recording mocks.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Chat, WindowChoice};

/// Outbound operations the pipeline needs from the messaging platform. Every failure is a
/// [`crate::DigestError::Delivery`].
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text notice to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends the file at `path` as a document.
    async fn send_document(&self, chat: &Chat, path: &Path) -> Result<()>;
    /// Sends `prompt` with one inline button per choice.
    async fn send_window_menu(
        &self,
        chat: &Chat,
        prompt: &str,
        choices: &[WindowChoice],
    ) -> Result<()>;
}
