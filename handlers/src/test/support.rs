//! Test doubles shared by the handler tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use digest_core::{Bot, Chat, ChatKind, Message, User, WindowChoice};
use llm_client::LlmClient;
use prompt::ChatMessage;
use storage::{ConversationRow, MessageStore, NewMessage, PersistenceError};

/// Records appends; fails every append when `fail` is set.
#[derive(Default)]
pub struct RecordingStore {
    pub appended: Mutex<Vec<NewMessage>>,
    pub fail: bool,
}

#[async_trait]
impl MessageStore for RecordingStore {
    async fn append(&self, message: &NewMessage) -> Result<i64, PersistenceError> {
        if self.fail {
            return Err(PersistenceError::InvalidUrl("store closed".to_string()));
        }
        let mut appended = self.appended.lock().unwrap();
        appended.push(message.clone());
        Ok(appended.len() as i64)
    }

    async fn query_by_window(&self, _days: u32) -> Result<Vec<ConversationRow>, PersistenceError> {
        Ok(Vec::new())
    }

    async fn close(&self) {}
}

#[derive(Default)]
pub struct MenuBot {
    pub menus: Mutex<Vec<(i64, String, Vec<WindowChoice>)>>,
}

#[async_trait]
impl Bot for MenuBot {
    async fn send_message(&self, _chat: &Chat, _text: &str) -> digest_core::Result<()> {
        Ok(())
    }

    async fn send_document(&self, _chat: &Chat, _path: &Path) -> digest_core::Result<()> {
        Ok(())
    }

    async fn send_window_menu(
        &self,
        chat: &Chat,
        prompt: &str,
        choices: &[WindowChoice],
    ) -> digest_core::Result<()> {
        self.menus
            .lock()
            .unwrap()
            .push((chat.id, prompt.to_string(), choices.to_vec()));
        Ok(())
    }
}

pub struct SilentLlm;

#[async_trait]
impl LlmClient for SilentLlm {
    async fn get_llm_response_with_messages(
        &self,
        _messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        Ok("report".to_string())
    }
}

pub fn chat(kind: ChatKind) -> Chat {
    Chat {
        id: -100,
        kind,
        title: Some("Team".to_string()),
        username: None,
    }
}

pub fn message(kind: ChatKind, text: Option<&str>) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
        },
        chat: chat(kind),
        text: text.map(String::from),
        sent_at: Utc::now(),
    }
}

pub fn recording_store() -> Arc<RecordingStore> {
    Arc::new(RecordingStore::default())
}
