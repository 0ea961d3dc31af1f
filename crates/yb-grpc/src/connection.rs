// ABOUTME: Authenticated control-plane connection used for one log-tail attempt.
// ABOUTME: Wraps a channel plus token interceptor and opens server-streamed log RPCs.

use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;

use yb_proto::client::YbApiV2Client;
use yb_proto::{Log, RequestIdentity};

use crate::auth::{TokenInterceptor, TokenSupplier};
use crate::channel::{create_channel, ChannelConfig};
use crate::error::GrpcClientError;

/// Server stream of log lines.
pub type LogStreaming = tonic::codec::Streaming<Log>;

type AuthedClient = YbApiV2Client<InterceptedService<Channel, TokenInterceptor>>;

/// A live channel to the control plane. Dropping it closes the channel.
pub struct YbConnection {
    client: AuthedClient,
    address: String,
}

/// Dial the control plane and attach the token supplier.
///
/// The supplier is not called here; it runs on every RPC made through the
/// returned connection.
pub async fn connect(
    config: &ChannelConfig,
    tokens: TokenSupplier,
) -> Result<YbConnection, GrpcClientError> {
    let channel = create_channel(config).await?;
    let client = YbApiV2Client::new(InterceptedService::new(
        channel,
        TokenInterceptor::new(tokens),
    ));
    Ok(YbConnection {
        client,
        address: config.address.clone(),
    })
}

impl YbConnection {
    /// Address this connection was dialed with.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Open the runtime log stream of an application.
    pub async fn app_log(
        &mut self,
        request: RequestIdentity,
    ) -> Result<LogStreaming, tonic::Status> {
        Ok(self.client.app_log(request).await?.into_inner())
    }

    /// Open the build log stream for a composite push-log id.
    pub async fn img_build_log(
        &mut self,
        request: RequestIdentity,
    ) -> Result<LogStreaming, tonic::Status> {
        Ok(self.client.img_build_log(request).await?.into_inner())
    }
}

impl Drop for YbConnection {
    fn drop(&mut self) {
        tracing::trace!(address = %self.address, "control-plane connection released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::static_token;
    use std::time::Duration;

    #[tokio::test]
    async fn test_connect_refused_is_connection_failed() {
        let config = ChannelConfig::new("127.0.0.1:1")
            .without_keep_alive()
            .with_connect_timeout(Duration::from_millis(100));
        let result = connect(&config, static_token("t")).await;
        assert!(matches!(
            result.err(),
            Some(GrpcClientError::ConnectionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_does_not_call_supplier() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();
        let supplier: TokenSupplier = Arc::new(move || {
            flag.store(true, Ordering::SeqCst);
            String::new()
        });

        let config =
            ChannelConfig::new("127.0.0.1:1").with_connect_timeout(Duration::from_millis(100));
        let _ = connect(&config, supplier).await;
        assert!(!called.load(Ordering::SeqCst));
    }
}
