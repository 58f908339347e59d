//! Bot configuration: BaseConfig (Telegram + log + DB + artifacts + admins) + AnalysisConfig
//! (model, policy, grouping, sweep schedule).

mod analysis;
mod base;
mod bot_config;
mod env;


pub use analysis::AnalysisConfig;
pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use env::parse_admin_ids;
