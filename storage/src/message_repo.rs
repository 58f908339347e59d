//! Message repository: SQLite-backed [`MessageStore`].
//!
//! Uses SqlitePoolManager and the models (NewMessage, ConversationRow).
//! Calendar days are bucketed in the repository's timezone so window queries follow local days.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, instrument};

use crate::error::PersistenceError;
use crate::models::{ConversationRow, NewMessage};
use crate::sqlite_pool::SqlitePoolManager;
use crate::store::MessageStore;

const DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
    tz: Tz,
}

impl MessageRepository {
    /// Opens (or creates) the database and ensures the schema exists.
    pub async fn new(database_url: &str, tz: Tz) -> Result<Self, PersistenceError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager, tz };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), PersistenceError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                username TEXT NOT NULL,
                chat_id INTEGER NOT NULL,
                chat_title TEXT NOT NULL,
                message_text TEXT NOT NULL,
                sent_at INTEGER NOT NULL,
                sent_day TEXT NOT NULL,
                chat_kind TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_sent_day ON messages(sent_day);
            CREATE INDEX IF NOT EXISTS idx_messages_chat_id ON messages(chat_id);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Calendar day of `at` in the repository's timezone.
    pub fn day_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.day_of(Utc::now())
    }
}

/// First day included in a `days` window ending on `today`.
fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

#[async_trait]
impl MessageStore for MessageRepository {
    #[instrument(skip(self, message), fields(chat_id = message.chat_id))]
    async fn append(&self, message: &NewMessage) -> Result<i64, PersistenceError> {
        let sent_day = self.day_of(message.sent_at).format(DAY_FORMAT).to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO messages (user_id, username, chat_id, chat_title, message_text, sent_at, sent_day, chat_kind)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(message.user_id)
        .bind(&message.username)
        .bind(message.chat_id)
        .bind(&message.chat_title)
        .bind(&message.message_text)
        .bind(message.sent_at.timestamp())
        .bind(&sent_day)
        .bind(&message.chat_kind)
        .execute(self.pool_manager.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!(id = id, sent_day = %sent_day, "Saved message");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn query_by_window(&self, days: u32) -> Result<Vec<ConversationRow>, PersistenceError> {
        let pool = self.pool_manager.pool();

        let rows = if days == 0 {
            sqlx::query_as::<_, ConversationRow>(
                "SELECT chat_id, chat_title, message_text FROM messages ORDER BY id ASC",
            )
            .fetch_all(pool)
            .await?
        } else {
            let today = self.today();
            let from = window_start(today, days);
            sqlx::query_as::<_, ConversationRow>(
                "SELECT chat_id, chat_title, message_text FROM messages \
                 WHERE sent_day >= ? AND sent_day <= ? ORDER BY id ASC",
            )
            .bind(from.format(DAY_FORMAT).to_string())
            .bind(today.format(DAY_FORMAT).to_string())
            .fetch_all(pool)
            .await?
        };

        info!(days = days, rows = rows.len(), "Queried messages by window");
        Ok(rows)
    }

    async fn close(&self) {
        self.pool_manager.close().await;
    }
}
