//! User-facing notice texts.

use digest_core::Window;

pub const MENU_PROMPT: &str = "Choose a period for message analysis:";
pub const RUN_SUMMARY: &str = "All analysis files have been delivered.";
pub const QUERY_FAILED: &str = "An error occurred while fetching messages from the database.";
pub const ALREADY_RUNNING: &str = "An analysis is already running.";

pub fn start_notice(window: Window) -> String {
    format!("Starting analysis of messages for {}...", window)
}

pub fn conversation_failed(title: &str) -> String {
    format!("Could not analyze messages from chat \"{}\".", title)
}
