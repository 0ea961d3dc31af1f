// ABOUTME: Error types for the yb-grpc crate.
// ABOUTME: Covers address validation and channel establishment failures.

use thiserror::Error;

/// Errors raised while establishing a connection to the control plane.
#[derive(Error, Debug)]
pub enum GrpcClientError {
    /// Invalid server address format.
    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    /// Failed to connect to the server.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

impl From<tonic::transport::Error> for GrpcClientError {
    fn from(err: tonic::transport::Error) -> Self {
        GrpcClientError::ConnectionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GrpcClientError::InvalidAddress("not a url".to_string());
        assert_eq!(err.to_string(), "invalid server address: not a url");

        let err = GrpcClientError::ConnectionFailed("dns error".to_string());
        assert_eq!(err.to_string(), "connection failed: dns error");
    }

    #[tokio::test]
    async fn test_from_tonic_transport_error() {
        use tonic::transport::Endpoint;

        let endpoint = Endpoint::from_static("http://[::1]:1");
        let result = endpoint.connect().await;

        if let Err(transport_err) = result {
            let grpc_err: GrpcClientError = transport_err.into();
            assert!(matches!(grpc_err, GrpcClientError::ConnectionFailed(_)));
        }
    }
}
