// ABOUTME: Re-exports generated protobuf types for the yb control-plane protocol.
// ABOUTME: Single source of truth for the log-streaming service and message types.

#![allow(clippy::derive_partial_eq_without_eq)]

/// Generated protobuf types for the yb control-plane protocol.
pub mod ybapi {
    tonic::include_proto!("ybapi");

    impl Log {
        /// Build a log line without a server timestamp.
        pub fn line(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
                time: None,
            }
        }
    }
}

// Re-export commonly used types at crate root for convenience
pub use ybapi::*;

// Re-export client types under a client module
pub mod client {
    pub use super::ybapi::yb_api_v2_client::YbApiV2Client;
}
