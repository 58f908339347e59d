//! 组件工厂：根据配置构建 BotComponents，把组装逻辑与 runner 隔离。

use std::sync::Arc;

use analysis::ConversationAnalyzer;
use anyhow::Result;
use digest_core::Bot;
use digest_telegram::{TelegramBotAdapter, TelegramConfig};
use handler_chain::HandlerChain;
use handlers::{LoggingHandler, PersistenceHandler, StartMenuHandler};
use llm_client::{LlmClient, OpenAILlmClient};
use pipeline::{ArtifactStore, Pipeline, ReportDispatcher, TriggerSurface};
use storage::{MessageRepository, MessageStore};
use tracing::{error, info, instrument};

use super::config::BotConfig;

/// run_bot / run_sweep_once 所需的核心依赖，由组件工厂产出。
#[derive(Clone)]
pub struct BotComponents {
    pub store: Arc<MessageRepository>,
    pub teloxide_bot: teloxide::Bot,
    /// Outbound transport used by the pipeline; the Telegram adapter unless overridden.
    pub bot: Arc<dyn Bot>,
    pub pipeline: Arc<Pipeline>,
    pub trigger: Arc<TriggerSurface>,
}

/// Builds BotComponents. When `bot_override` is `Some`, notices and documents go there instead of
/// Telegram (integration tests).
#[instrument(skip(config, bot_override))]
pub async fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn Bot>>,
) -> Result<BotComponents> {
    let tz = config.timezone()?;
    let store = Arc::new(
        MessageRepository::new(config.database_url(), tz)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    database_url = %config.database_url(),
                    "Failed to initialize message storage"
                );
                anyhow::anyhow!("Failed to initialize message storage: {}", e)
            })?,
    );

    let telegram = TelegramConfig {
        bot_token: config.bot_token().to_string(),
        telegram_api_url: config.telegram_api_url().map(str::to_string),
    };
    let teloxide_bot = telegram.build_bot()?;
    let bot: Arc<dyn Bot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let openai = OpenAILlmClient::from_config(config.llm());
    info!(
        model = %openai.model(),
        max_tokens = ?openai.max_tokens(),
        timeout_secs = config.analysis().timeout_secs,
        max_retries = config.analysis().max_retries,
        "Analyzer configured"
    );
    let llm_client: Arc<dyn LlmClient> = Arc::new(openai);
    let analyzer = ConversationAnalyzer::new(llm_client, config.analysis().policy());

    let artifacts = Arc::new(ArtifactStore::new(config.artifacts_dir()));
    artifacts.ensure_dir().await.map_err(|e| {
        error!(error = %e, "Failed to create artifacts directory");
        anyhow::anyhow!("Failed to create artifacts directory: {}", e)
    })?;

    let dispatcher = ReportDispatcher::new(bot.clone(), artifacts);
    let pipeline = Arc::new(Pipeline::new(
        store.clone() as Arc<dyn MessageStore>,
        analyzer,
        dispatcher,
        config.group_by()?,
    ));
    let trigger = Arc::new(TriggerSurface::new(
        pipeline.clone(),
        bot.clone(),
        config.admin_ids().to_vec(),
        config.menu_admins_only(),
    ));

    Ok(BotComponents {
        store,
        teloxide_bot,
        bot,
        pipeline,
        trigger,
    })
}

/// 构建处理链（日志 → 持久化 → /start 菜单）。
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let store: Arc<dyn MessageStore> = components.store.clone();
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(PersistenceHandler::new(store)))
        .add_handler(Arc::new(StartMenuHandler::new(components.trigger.clone())))
}
