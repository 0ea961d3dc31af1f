// ABOUTME: Maps the way a log stream ended onto a retry decision.
// ABOUTME: Structured status codes and h2 resets first, then the RST_STREAM message fallback.

use std::error::Error as StdError;

use tonic::Code;

/// Marker some transports and proxies put in the message of a peer-reset stream.
///
/// Matching on it is a heuristic: it only applies when the structured reset
/// is no longer visible in the error's source chain.
pub const RESET_MARKER: &str = "RST_STREAM";

/// How a drained stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server closed the stream cleanly.
    Success,
    /// Quota or resource exhaustion. Reconnecting will not help.
    Terminal,
    /// The peer reset the stream mid-flight.
    Transient,
    /// Anything else. Retried, but worth a look.
    Unclassified,
}

/// Classify the error a stream ended with (`None` for a clean end).
pub fn classify(error: Option<&tonic::Status>) -> Outcome {
    let Some(status) = error else {
        return Outcome::Success;
    };
    if status.code() == Code::ResourceExhausted {
        return Outcome::Terminal;
    }
    if is_peer_reset(status) || status.message().contains(RESET_MARKER) {
        return Outcome::Transient;
    }
    Outcome::Unclassified
}

/// Whether an HTTP/2 stream reset sent by the server sits anywhere in the
/// status' source chain. Resets this side sent do not count.
fn is_peer_reset(status: &tonic::Status) -> bool {
    let mut source = StdError::source(status);
    while let Some(err) = source {
        if let Some(h2_err) = err.downcast_ref::<h2::Error>() {
            return h2_err.is_reset() && h2_err.is_remote();
        }
        source = err.source();
    }
    false
}
