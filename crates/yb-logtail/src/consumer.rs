// ABOUTME: Drains an open log stream into an output sink in receipt order.
// ABOUTME: Transport errors are returned untouched so the caller can classify them.

use futures::{Stream, StreamExt};
use yb_proto::Log;

/// Destination for streamed log lines.
pub trait LogSink: Send {
    /// Write one line. Called in exactly the order lines arrive.
    fn write_line(&mut self, line: &Log) -> std::io::Result<()>;
}

impl LogSink for Vec<Log> {
    fn write_line(&mut self, line: &Log) -> std::io::Result<()> {
        self.push(line.clone());
        Ok(())
    }
}

/// Why draining stopped before a clean end-of-stream.
#[derive(Debug)]
pub enum DrainError {
    /// The stream itself failed.
    Stream(tonic::Status),
    /// The sink refused a line.
    Sink(std::io::Error),
}

/// Forward every message of `stream` to `sink` until the stream ends.
///
/// Returns the number of lines written on a clean end.
pub async fn drain<S, K>(stream: &mut S, sink: &mut K) -> Result<u64, DrainError>
where
    S: Stream<Item = Result<Log, tonic::Status>> + Unpin + ?Sized,
    K: LogSink + ?Sized,
{
    let mut lines = 0u64;
    while let Some(item) = stream.next().await {
        let line = item.map_err(DrainError::Stream)?;
        sink.write_line(&line).map_err(DrainError::Sink)?;
        lines += 1;
    }
    Ok(lines)
}
