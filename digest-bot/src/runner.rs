//! Entry points: the long-running bot (dispatcher + daily sweep) and a one-shot sweep.

use std::sync::Arc;

use anyhow::Result;
use digest_core::{init_tracing, SelectionHandler, Window};
use digest_telegram::run_dispatcher;
use pipeline::{run_daily, run_sweep, SWEEP_WINDOW};
use storage::MessageStore;
use tracing::{info, instrument, warn};

use super::components::{build_bot_components, build_handler_chain};
use super::config::BotConfig;

/// Main entry: validate config, init logging, build components, start the daily sweep, then run
/// the dispatcher until Ctrl-C. On shutdown the sweep is stopped and the store is closed.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        artifacts_dir = %config.artifacts_dir(),
        admins = config.admin_ids().len(),
        "Initializing bot"
    );

    let components = build_bot_components(&config, None).await?;
    let handler_chain = build_handler_chain(&components);

    let sweep_task = if config.admin_ids().is_empty() {
        warn!("No administrators configured, daily sweep disabled");
        None
    } else {
        let schedule = config.schedule()?;
        let pipeline = components.pipeline.clone();
        let admins = config.admin_ids().to_vec();
        info!(
            at = %schedule.at,
            timezone = %schedule.tz,
            "Daily sweep enabled"
        );
        Some(tokio::spawn(run_daily(schedule, move || {
            let pipeline = pipeline.clone();
            let admins = admins.clone();
            async move {
                run_sweep(&pipeline, &admins, SWEEP_WINDOW).await;
            }
        })))
    };

    info!("Bot started successfully");

    let selection: Arc<dyn SelectionHandler> = components.trigger.clone();
    let result = run_dispatcher(components.teloxide_bot.clone(), handler_chain, selection).await;

    if let Some(task) = sweep_task {
        task.abort();
    }
    components.store.close().await;
    info!("Bot stopped, message store closed");

    result
}

/// Runs one sweep over the last `days` days (0 = all time) for every administrator, then exits.
#[instrument(skip(config))]
pub async fn run_sweep_once(config: BotConfig, days: u32) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    if config.admin_ids().is_empty() {
        anyhow::bail!("ADMIN_IDS (or ADMIN_ID) must be set to run a sweep");
    }

    let components = build_bot_components(&config, None).await?;
    let window = Window::days(days);
    let outcomes = run_sweep(&components.pipeline, config.admin_ids(), window).await;
    components.store.close().await;

    let failed: Vec<i64> = outcomes
        .iter()
        .filter(|o| o.result.is_err())
        .map(|o| o.admin_id)
        .collect();
    if failed.is_empty() {
        info!(admins = outcomes.len(), window = %window, "Sweep completed");
        Ok(())
    } else {
        anyhow::bail!("sweep failed for administrators {:?}", failed)
    }
}
