//! # digest-core
//!
//! Core types and traits for chat-digest: [`Bot`], [`Handler`], [`SelectionHandler`], message,
//! chat and window types, the error taxonomy, and tracing initialization. Transport-agnostic;
//! used by storage-facing handlers, the pipeline, and digest-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DigestError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, ChatKind, Handler, HandlerResponse, Message, SelectionHandler, ToCoreMessage, ToCoreUser,
    User, Window, WindowChoice, COMMAND_MARKER, NON_TEXT_PLACEHOLDER, PRIVATE_CHAT_TITLE,
    UNKNOWN_USERNAME,
};
