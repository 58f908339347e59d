//! Core types: user, chat, message, window, handler response, and the Handler / SelectionHandler traits.
//!
//! One file per main type, as in the rest of the workspace.

mod chat;
mod handler;
mod message;
mod response;
mod user;
mod window;

pub use chat::{Chat, ChatKind, PRIVATE_CHAT_TITLE};
pub use handler::{Handler, SelectionHandler, ToCoreMessage, ToCoreUser};
pub use message::{Message, COMMAND_MARKER, NON_TEXT_PLACEHOLDER};
pub use response::HandlerResponse;
pub use user::{User, UNKNOWN_USERNAME};
pub use window::{Window, WindowChoice};
