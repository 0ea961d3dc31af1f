// ABOUTME: Implementation of 'yb push' commands
// ABOUTME: Tails the build log of an image push identified by app name and tag

use anyhow::Result;
use yb_logtail::{CancellationToken, LogTailError, StreamTarget};

use super::{PushCommand, TailOptions};
use crate::config::Settings;

pub async fn run(settings: &Settings, cmd: PushCommand, cancel: CancellationToken) -> Result<()> {
    match cmd {
        PushCommand::Log { name, tag, output } => {
            build_log(settings, &name, &tag, &output, cancel).await
        }
    }
}

async fn build_log(
    settings: &Settings,
    name: &str,
    tag: &str,
    output: &TailOptions,
    cancel: CancellationToken,
) -> Result<()> {
    let target = StreamTarget::for_build_log(name, tag)?;
    crate::tail(settings, target, output, cancel)
        .await
        .map_err(|err| build_log_error(err, name, tag))
}

/// Only a failed setup is worth retrying, so only that gets the retry hint.
fn build_log_error(err: LogTailError, name: &str, tag: &str) -> anyhow::Error {
    let retryable = matches!(
        err,
        LogTailError::Connection(_) | LogTailError::OpenStream { .. }
    );
    let err = anyhow::Error::new(err);
    if retryable {
        err.context(format!(
            "Could not get build log right now!\nTry again in a few seconds using:\n$ yb push log --name={name} --tag={tag}"
        ))
    } else {
        err.context("Could not get build log")
    }
}
