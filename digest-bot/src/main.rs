//! `digest` binary: `run` starts the bot, `sweep` runs one administrator sweep and exits.

use anyhow::Result;
use clap::Parser;
use digest_bot::{load_config, run_bot, run_sweep_once, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run_bot(load_config(token)?).await,
        Commands::Sweep { token, days } => run_sweep_once(load_config(token)?, days).await,
    }
}
