// ABOUTME: Reconnect loop for one logical log tail.
// ABOUTME: Connect, stream, classify; then stop, or wait a fixed delay and reopen the same target.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::classify::{classify, Outcome};
use crate::consumer::{drain, DrainError, LogSink};
use crate::error::LogTailError;
use crate::identity::StreamTarget;
use crate::transport::{Connector, LogConnection};

/// Delay between a failed stream and the next connection attempt.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Retry policy for a session.
///
/// There is deliberately no attempt limit: a tail keeps reconnecting until the
/// server ends it or the caller cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

/// How a session finished without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The server closed the stream cleanly.
    Completed,
    /// The server reported resource exhaustion.
    Exhausted,
    /// The caller cancelled the session.
    Cancelled,
}

/// Result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    /// Connections acquired, including the first.
    pub attempts: u32,
    /// Retry waits entered.
    pub retries: u32,
    /// Log lines written to the sink across all attempts.
    pub lines: u64,
}

/// What one attempt produced.
enum Attempt {
    Finished(Outcome, Option<tonic::Status>),
    Cancelled,
}

/// Sink adapter that tallies lines across attempts.
struct Counted<'a, K: ?Sized> {
    inner: &'a mut K,
    lines: &'a mut u64,
}

impl<K: LogSink + ?Sized> LogSink for Counted<'_, K> {
    fn write_line(&mut self, line: &yb_proto::Log) -> std::io::Result<()> {
        self.inner.write_line(line)?;
        *self.lines += 1;
        Ok(())
    }
}

/// A single log-tail session: one target, one connector, one retry policy.
pub struct LogTail<C> {
    connector: C,
    target: StreamTarget,
    policy: RetryPolicy,
    cancel: CancellationToken,
}

impl<C: Connector> LogTail<C> {
    pub fn new(connector: C, target: StreamTarget) -> Self {
        Self {
            connector,
            target,
            policy: RetryPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use an external token to stop the session from outside.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn target(&self) -> &StreamTarget {
        &self.target
    }

    /// Run the session to completion, writing every line to `sink`.
    ///
    /// Setup failures (connect, RPC open) and sink failures are returned as
    /// errors. Stream failures are classified: exhaustion ends the session,
    /// everything else is retried after the policy delay.
    pub async fn run<K: LogSink + ?Sized>(
        &self,
        sink: &mut K,
    ) -> Result<SessionSummary, LogTailError> {
        let mut summary = SessionSummary {
            end: SessionEnd::Completed,
            attempts: 0,
            retries: 0,
            lines: 0,
        };

        loop {
            if summary.attempts > 0 {
                summary.retries += 1;
                tracing::debug!(delay = ?self.policy.delay, "waiting before reconnect");
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => {
                        summary.end = SessionEnd::Cancelled;
                        return Ok(summary);
                    }
                    _ = tokio::time::sleep(self.policy.delay) => {}
                }
            }

            summary.attempts += 1;
            let span = tracing::debug_span!("attempt", n = summary.attempts, stream = %self.target);
            let attempt = self.attempt(sink, &mut summary.lines).instrument(span).await?;

            match attempt {
                Attempt::Cancelled => {
                    summary.end = SessionEnd::Cancelled;
                    return Ok(summary);
                }
                Attempt::Finished(Outcome::Success, _) => {
                    tracing::debug!(lines = summary.lines, "log stream completed");
                    summary.end = SessionEnd::Completed;
                    return Ok(summary);
                }
                Attempt::Finished(Outcome::Terminal, status) => {
                    tracing::info!(
                        error = ?status.as_ref().map(|s| s.message()),
                        "log stream exhausted, not reconnecting"
                    );
                    summary.end = SessionEnd::Exhausted;
                    return Ok(summary);
                }
                Attempt::Finished(Outcome::Transient, status) => {
                    tracing::info!(
                        error = ?status.as_ref().map(|s| s.message()),
                        "log stream reset by peer, reconnecting"
                    );
                }
                Attempt::Finished(Outcome::Unclassified, status) => {
                    tracing::warn!(
                        code = ?status.as_ref().map(|s| s.code()),
                        error = ?status.as_ref().map(|s| s.message()),
                        "log stream failed, reconnecting"
                    );
                }
            }
        }
    }

    /// Connecting and Streaming for one attempt. The connection is dropped
    /// on every path out of this function.
    async fn attempt<K: LogSink + ?Sized>(
        &self,
        sink: &mut K,
        lines: &mut u64,
    ) -> Result<Attempt, LogTailError> {
        let mut conn = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(Attempt::Cancelled),
            conn = self.connector.connect() => conn?,
        };
        tracing::debug!("connected");

        let mut stream = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(Attempt::Cancelled),
            opened = conn.open_stream(&self.target) => opened.map_err(|status| LogTailError::OpenStream {
                target: self.target.to_string(),
                status,
            })?,
        };
        tracing::debug!("streaming");

        let mut counted = Counted { inner: sink, lines };
        let drained = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(Attempt::Cancelled),
            drained = drain(&mut stream, &mut counted) => drained,
        };
        drop(stream);
        drop(conn);

        let status = match drained {
            Ok(_) => None,
            Err(DrainError::Sink(err)) => return Err(LogTailError::Output(err)),
            Err(DrainError::Stream(status)) => Some(status),
        };
        Ok(Attempt::Finished(classify(status.as_ref()), status))
    }
}
