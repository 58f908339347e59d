use async_trait::async_trait;

use crate::error::PersistenceError;
use crate::models::{ConversationRow, NewMessage};

/// Append-only record keeper for captured messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Inserts a message and returns its store-assigned id (strictly increasing).
    async fn append(&self, message: &NewMessage) -> Result<i64, PersistenceError>;

    /// Rows whose calendar day lies in `[today - days, today]`; every row when `days == 0`.
    /// Rows come back in arrival order.
    async fn query_by_window(&self, days: u32) -> Result<Vec<ConversationRow>, PersistenceError>;

    /// Releases the underlying handle. Further calls fail with [`PersistenceError`].
    async fn close(&self);
}
