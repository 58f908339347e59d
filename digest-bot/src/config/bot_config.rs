//! BotConfig: BaseConfig + AnalysisConfig. Use load() for env-based loading.

use anyhow::Result;
use chrono_tz::Tz;
use llm_client::EnvLlmConfig;
use pipeline::{GroupBy, SweepSchedule};

use super::{AnalysisConfig, BaseConfig};

/// Immutable after startup; components receive it by reference.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub analysis: AnalysisConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let analysis = AnalysisConfig::from_env()?;
        Ok(Self { base, analysis })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.analysis.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn artifacts_dir(&self) -> &str {
        &self.base.artifacts_dir
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn admin_ids(&self) -> &[i64] {
        &self.base.admin_ids
    }
    pub fn menu_admins_only(&self) -> bool {
        self.base.menu_admins_only
    }

    pub fn llm(&self) -> &EnvLlmConfig {
        &self.analysis.llm
    }
    pub fn group_by(&self) -> Result<GroupBy> {
        self.analysis.group_by()
    }
    pub fn schedule(&self) -> Result<SweepSchedule> {
        self.analysis.schedule()
    }
    pub fn timezone(&self) -> Result<Tz> {
        self.analysis.timezone()
    }
}
