//! Storage crate: the Message Store.
//!
//! ## Modules
//!
//! - [`error`] – PersistenceError
//! - [`models`] – NewMessage, ConversationRow
//! - [`store`] – MessageStore trait (append / query_by_window / close)
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod message_repo;
mod models;
mod sqlite_pool;
mod store;

pub use error::PersistenceError;
pub use message_repo::MessageRepository;
pub use models::{ConversationRow, NewMessage};
pub use sqlite_pool::SqlitePoolManager;
pub use store::MessageStore;
