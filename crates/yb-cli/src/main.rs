// ABOUTME: Entry point for the yb CLI
// ABOUTME: Loads .env, sets up logging, and cancels running tails on Ctrl-C

use anyhow::Result;
use clap::Parser;
use yb_cli::commands::Cli;
use yb_logtail::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap reads YB_* variables)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    yb_log::init(cli.verbose);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received, stopping log tail");
            on_interrupt.cancel();
        }
    });

    yb_cli::run_command(cli, cancel).await
}
