//! # chat-digest application
//!
//! Wires storage, handlers, the analysis pipeline and the Telegram transport. Loads config from
//! env and runs the dispatcher with the daily sweep, or a single sweep from the CLI.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{AnalysisConfig, BaseConfig, BotConfig};
pub use runner::{run_bot, run_sweep_once};
