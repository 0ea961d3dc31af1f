// ABOUTME: Implementation of 'yb log'
// ABOUTME: Tails the runtime log of an application until it ends or the user interrupts

use anyhow::{Context, Result};
use yb_logtail::{CancellationToken, StreamTarget};

use super::LogArgs;
use crate::config::Settings;

pub async fn run(settings: &Settings, args: LogArgs, cancel: CancellationToken) -> Result<()> {
    let target = StreamTarget::for_runtime_log(&args.args)?;
    crate::tail(settings, target, &args.output, cancel)
        .await
        .context("Could not get application log")
}
