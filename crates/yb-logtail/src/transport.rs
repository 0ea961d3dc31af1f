// ABOUTME: Seams between the reconnect loop and the network.
// ABOUTME: A Connector dials one connection per attempt; a connection opens one log stream.

use async_trait::async_trait;
use futures::stream::BoxStream;
use yb_grpc::GrpcClientError;
use yb_proto::Log;

use crate::identity::StreamTarget;

/// Server-streamed log lines for one attempt.
pub type LogStream = BoxStream<'static, Result<Log, tonic::Status>>;

/// Produces a fresh connection for every attempt of a session.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: LogConnection;

    /// Dial the control plane. Failures here are fatal to the session.
    async fn connect(&self) -> Result<Self::Connection, GrpcClientError>;
}

/// A connection owned by exactly one attempt. Dropping it releases it.
#[async_trait]
pub trait LogConnection: Send {
    /// Start the log RPC for `target`.
    async fn open_stream(&mut self, target: &StreamTarget) -> Result<LogStream, tonic::Status>;
}
