// ABOUTME: Resilient log tailing for the yb control plane.
// ABOUTME: Identity building, stream draining, failure classification and the reconnect loop.

//! # yb-logtail
//!
//! A log tail is one [`LogTail`] session: a [`StreamTarget`] computed once from
//! caller input, a [`Connector`] that dials a fresh connection per attempt, and
//! a [`RetryPolicy`]. Each attempt drains the server stream into a
//! [`LogSink`]; how the stream ended decides what happens next:
//!
//! ```text
//! Connecting ──► Streaming ──► Success     (clean end)
//!     │              ├───────► Terminal    (resource exhausted)
//!     │              └───────► RetryWait ──► Connecting
//!     └─ connect / open failure: returned to the caller, never retried
//! ```
//!
//! Retries are unbounded; cancel the session's token to stop it.

pub mod classify;
pub mod consumer;
pub mod error;
pub mod grpc;
pub mod identity;
pub mod session;
pub mod transport;

pub use classify::{classify, Outcome, RESET_MARKER};
pub use consumer::{drain, DrainError, LogSink};
pub use error::{InvalidArgument, LogTailError};
pub use grpc::GrpcConnector;
pub use identity::{LogSource, StreamTarget};
pub use session::{LogTail, RetryPolicy, SessionEnd, SessionSummary, DEFAULT_RETRY_DELAY};
pub use transport::{Connector, LogConnection, LogStream};

// Re-export for callers wiring cancellation
pub use tokio_util::sync::CancellationToken;
