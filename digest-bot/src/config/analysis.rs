//! Analysis config: model access, call policy, grouping, and the daily sweep. Loaded from env.

use std::time::Duration;

use analysis::{
    AnalysisPolicy, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_SEGMENT_MAX_CHARS,
    DEFAULT_SEGMENT_OVERLAP_CHARS, DEFAULT_TIMEOUT_SECS,
};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use llm_client::{EnvLlmConfig, LlmConfig};
use pipeline::{GroupBy, SweepSchedule};

use super::env::{env_or, env_parse};

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// OPENAI_API_KEY, OPENAI_BASE_URL, MODEL, MAX_TOKENS
    pub llm: EnvLlmConfig,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub segment_max_chars: usize,
    pub segment_overlap_chars: usize,
    /// `title` or `chat_id`
    pub group_by: String,
    /// Local `HH:MM` of the daily sweep
    pub sweep_time: String,
    /// IANA zone for the sweep and for calendar-day windows
    pub sweep_timezone: String,
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            llm: EnvLlmConfig::from_env()?,
            timeout_secs: env_parse("ANALYSIS_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_retries: env_parse("ANALYSIS_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            retry_backoff_ms: env_parse("ANALYSIS_RETRY_BACKOFF_MS", DEFAULT_RETRY_BACKOFF_MS)?,
            segment_max_chars: env_parse("SEGMENT_MAX_CHARS", DEFAULT_SEGMENT_MAX_CHARS)?,
            segment_overlap_chars: env_parse(
                "SEGMENT_OVERLAP_CHARS",
                DEFAULT_SEGMENT_OVERLAP_CHARS,
            )?,
            group_by: env_or("GROUP_BY", "title"),
            sweep_time: env_or("SWEEP_TIME", "11:00"),
            sweep_timezone: env_or("SWEEP_TIMEZONE", "Europe/Moscow"),
        })
    }

    pub fn policy(&self) -> AnalysisPolicy {
        AnalysisPolicy {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            segment_max_chars: self.segment_max_chars,
            segment_overlap_chars: self.segment_overlap_chars,
        }
    }

    pub fn group_by(&self) -> Result<GroupBy> {
        self.group_by
            .parse()
            .map_err(|e: String| anyhow::anyhow!("GROUP_BY: {}", e))
    }

    pub fn schedule(&self) -> Result<SweepSchedule> {
        SweepSchedule::parse(&self.sweep_time, &self.sweep_timezone)
            .map_err(|e| anyhow::anyhow!("SWEEP_TIME / SWEEP_TIMEZONE: {}", e))
    }

    pub fn timezone(&self) -> Result<Tz> {
        Ok(self.schedule()?.tz)
    }

    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(self.llm.base_url())
            .with_context(|| format!("OPENAI_BASE_URL is not a valid URL: {}", self.llm.base_url()))?;
        if self.llm.api_key().trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is empty");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("ANALYSIS_TIMEOUT_SECS must be greater than 0");
        }
        if self.segment_max_chars > 0 && self.segment_overlap_chars >= self.segment_max_chars {
            anyhow::bail!(
                "SEGMENT_OVERLAP_CHARS ({}) must be smaller than SEGMENT_MAX_CHARS ({})",
                self.segment_overlap_chars,
                self.segment_max_chars
            );
        }
        self.group_by()?;
        self.schedule()?;
        Ok(())
    }
}
