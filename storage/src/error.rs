//! Storage error types.
//!
//! Used by [`crate::MessageStore`] implementations and their callers.

use thiserror::Error;

/// Errors that can occur when appending to or querying the message store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),
}
