//! 基础配置：Telegram 连接、日志、数据库、产物目录与管理员，从环境变量加载。

use anyhow::{Context, Result};
use std::env;

use super::env::{env_or, env_parse, parse_admin_ids};

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// 日志文件路径
    pub log_file: String,
    /// 消息存储（SQLite URL 或路径）
    pub database_url: String,
    /// Directory for `<title>.txt` / `<title>_analysis.txt`
    pub artifacts_dir: String,
    /// ADMIN_IDS (or ADMIN_ID): sweep recipients
    pub admin_ids: Vec<i64>,
    /// 仅管理员可使用 /start 菜单
    pub menu_admins_only: bool,
}

impl BaseConfig {
    /// 从环境变量加载；传入 `token` 时覆盖 BOT_TOKEN。
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let admin_ids = parse_admin_ids(
            &env::var("ADMIN_IDS")
                .or_else(|_| env::var("ADMIN_ID"))
                .unwrap_or_default(),
        )?;

        Ok(Self {
            bot_token,
            telegram_api_url: digest_telegram::api_url_from_env(),
            log_file: env_or("LOG_FILE", "logs/chat-digest.log"),
            database_url: env_or("DATABASE_URL", "./messages.db"),
            artifacts_dir: env_or("ARTIFACTS_DIR", "./chats"),
            admin_ids,
            menu_admins_only: env_parse("MENU_ADMINS_ONLY", false)?,
        })
    }

    /// 校验配置（如设置了 telegram_api_url，则必须是合法 URL）。
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
