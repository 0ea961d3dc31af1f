// ABOUTME: Library side of the yb CLI: command dispatch and the shared tail runner.
// ABOUTME: Keeps main.rs down to env loading, logging setup and interrupt wiring.

//! # yb-cli
//!
//! ```text
//! yb
//! ├── log <APP>                       # Tail an application's runtime log
//! └── push
//!     └── log --name <APP> --tag <T>  # Tail the build log of a push
//! ```
//!
//! Every command reads `--host` / `--token` / `--config` (or `YB_HOST`,
//! `YB_TOKEN`, `YB_CONFIG`) and falls back to `~/.yb/config.json`.

use std::time::Duration;

use colored::Colorize;
use yb_grpc::ChannelConfig;
use yb_logtail::{
    CancellationToken, GrpcConnector, LogTail, LogTailError, RetryPolicy, SessionEnd,
    StreamTarget,
};

pub mod commands;
pub mod config;
pub mod render;

use commands::{Cli, Command, TailOptions};
use config::Settings;
use render::TerminalSink;

/// Run a parsed command. `cancel` stops any running log tail.
pub async fn run_command(cli: Cli, cancel: CancellationToken) -> anyhow::Result<()> {
    let settings = Settings::resolve(cli.host, cli.token, cli.config);

    match cli.command {
        Command::Log(args) => commands::log::run(&settings, args, cancel).await,
        Command::Push(cmd) => commands::push::run(&settings, cmd, cancel).await,
    }
}

/// Tail `target` to stdout until the server ends it, it is exhausted, or
/// `cancel` fires. Exhaustion is an expected end, not an error.
pub(crate) async fn tail(
    settings: &Settings,
    target: StreamTarget,
    options: &TailOptions,
    cancel: CancellationToken,
) -> Result<(), LogTailError> {
    let connector = GrpcConnector::new(
        ChannelConfig::new(&settings.host),
        settings.tokens.clone(),
    );
    let host = connector.address().to_string();

    let session = LogTail::new(connector, target)
        .with_policy(RetryPolicy::with_delay(Duration::from_millis(
            options.retry_delay_ms,
        )))
        .with_cancellation(cancel);
    tracing::info!(%host, stream = %session.target(), "tailing log");

    let mut sink = TerminalSink::stdout(options.timestamps);
    let summary = session.run(&mut sink).await?;

    tracing::debug!(
        attempts = summary.attempts,
        retries = summary.retries,
        lines = summary.lines,
        "log tail finished"
    );
    if summary.end == SessionEnd::Exhausted {
        eprintln!(
            "{}",
            "Log stream closed by the server: resource limit reached".dimmed()
        );
    }
    Ok(())
}
