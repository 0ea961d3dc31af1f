// ABOUTME: Connection factory for the yb control plane.
// ABOUTME: Provides channel creation, bearer-token injection and log-stream connections.

pub mod auth;
pub mod channel;
pub mod connection;
pub mod error;

// Channel creation
pub use channel::{create_channel, normalize_host, ChannelConfig, KeepAlive};

// Authentication
pub use auth::{static_token, TokenInterceptor, TokenSupplier};

// Connections
pub use connection::{connect, LogStreaming, YbConnection};

// Error types
pub use error::GrpcClientError;

// Re-export proto types for convenience
pub use yb_proto;
