//! Shared fixtures: recording bot, keyed LLM, seeded in-memory store.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use analysis::{AnalysisPolicy, ConversationAnalyzer};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use digest_core::{Bot, Chat, DigestError, WindowChoice};
use llm_client::LlmClient;
use pipeline::{ArtifactStore, GroupBy, Pipeline, ReportDispatcher};
use prompt::ChatMessage;
use storage::{MessageRepository, MessageStore, NewMessage};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message(i64, String),
    Document(i64, PathBuf),
    Menu(i64, String, Vec<WindowChoice>),
}

/// Records everything sent; fails documents to chats listed in `failing_documents`.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<Sent>>,
    pub document_attempts: Mutex<Vec<i64>>,
    pub failing_documents: HashSet<i64>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_documents_for(ids: &[i64]) -> Arc<Self> {
        Arc::new(Self {
            failing_documents: ids.iter().copied().collect(),
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message(id, text) if id == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn documents_to(&self, chat_id: i64) -> Vec<PathBuf> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Document(id, path) if id == chat_id => Some(path),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> digest_core::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Message(chat.id, text.to_string()));
        Ok(())
    }

    async fn send_document(&self, chat: &Chat, path: &Path) -> digest_core::Result<()> {
        self.document_attempts.lock().unwrap().push(chat.id);
        if self.failing_documents.contains(&chat.id) {
            return Err(DigestError::Delivery("chat not found".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Document(chat.id, path.to_path_buf()));
        Ok(())
    }

    async fn send_window_menu(
        &self,
        chat: &Chat,
        prompt: &str,
        choices: &[WindowChoice],
    ) -> digest_core::Result<()> {
        self.sent.lock().unwrap().push(Sent::Menu(
            chat.id,
            prompt.to_string(),
            choices.to_vec(),
        ));
        Ok(())
    }
}

/// Fails when the user turn contains `fail_marker`, otherwise echoes a report.
pub struct KeyedLlm {
    pub fail_marker: Option<String>,
    pub calls: Mutex<usize>,
}

impl KeyedLlm {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail_marker: None,
            calls: Mutex::new(0),
        })
    }

    pub fn failing_on(marker: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_marker: Some(marker.to_string()),
            calls: Mutex::new(0),
        })
    }
}

#[async_trait]
impl LlmClient for KeyedLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        *self.calls.lock().unwrap() += 1;
        let user = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        if let Some(marker) = &self.fail_marker {
            if user.contains(marker.as_str()) {
                return Err(anyhow::anyhow!("500 Internal Server Error"));
            }
        }
        Ok(format!("report for: {}", user))
    }
}

pub fn group_message(chat_id: i64, title: &str, text: &str, days_ago: i64) -> NewMessage {
    NewMessage {
        user_id: 100,
        username: "ivan".to_string(),
        chat_id,
        chat_title: title.to_string(),
        message_text: text.to_string(),
        sent_at: Utc::now() - Duration::days(days_ago),
        chat_kind: "supergroup".to_string(),
    }
}

pub async fn seeded_store(messages: &[NewMessage]) -> Arc<MessageRepository> {
    let repo = MessageRepository::new("sqlite::memory:", chrono_tz::UTC)
        .await
        .expect("in-memory store");
    for message in messages {
        repo.append(message).await.expect("seed");
    }
    Arc::new(repo)
}

pub struct Fixture {
    pub pipeline: Arc<Pipeline>,
    pub bot: Arc<MockBot>,
    pub artifacts_dir: TempDir,
}

impl Fixture {
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.artifacts_dir.path().join(name)
    }
}

pub async fn fixture(
    store: Arc<dyn MessageStore>,
    llm: Arc<dyn LlmClient>,
    bot: Arc<MockBot>,
) -> Fixture {
    let artifacts_dir = TempDir::new().unwrap();
    let artifacts = Arc::new(ArtifactStore::new(artifacts_dir.path()));
    artifacts.ensure_dir().await.unwrap();
    let dispatcher = ReportDispatcher::new(bot.clone(), artifacts);
    let analyzer = ConversationAnalyzer::new(llm, AnalysisPolicy::default());
    let pipeline = Arc::new(Pipeline::new(store, analyzer, dispatcher, GroupBy::Title));
    Fixture {
        pipeline,
        bot,
        artifacts_dir,
    }
}
