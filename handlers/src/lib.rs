//! # Handlers for the digest chain
//!
//! This crate provides handler implementations: logging, message capture, and the `/start` menu.

mod capture;
mod logging;
mod persistence_handler;
mod start_menu_handler;

#[cfg(test)]
mod test;

pub use capture::{should_capture, to_new_message};
pub use logging::LoggingHandler;
pub use persistence_handler::PersistenceHandler;
pub use start_menu_handler::{StartMenuHandler, START_COMMAND};
