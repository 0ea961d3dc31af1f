// ABOUTME: Error types for the yb-logtail crate.
// ABOUTME: Only setup-phase and output failures surface; stream errors are classified instead.

use thiserror::Error;
use yb_grpc::GrpcClientError;

/// Malformed caller input for a log-tail session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid argument: {0}")]
pub struct InvalidArgument(pub String);

/// Fatal errors that end a log-tail session.
#[derive(Error, Debug)]
pub enum LogTailError {
    /// Caller input could not be turned into a stream identity.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// The channel to the control plane could not be established.
    #[error("could not reach control plane: {0}")]
    Connection(#[from] GrpcClientError),

    /// The log RPC was rejected before any line was streamed.
    #[error("could not open {target}: {status}")]
    OpenStream {
        target: String,
        #[source]
        status: tonic::Status,
    },

    /// Writing a log line to the output sink failed.
    #[error("failed to write log output: {0}")]
    Output(#[source] std::io::Error),
}
