// ABOUTME: Connector backed by the real control-plane channel.
// ABOUTME: Dials with yb-grpc and routes each target to AppLog or ImgBuildLog.

use async_trait::async_trait;
use futures::StreamExt;
use yb_grpc::{ChannelConfig, GrpcClientError, TokenSupplier, YbConnection};

use crate::identity::{LogSource, StreamTarget};
use crate::transport::{Connector, LogConnection, LogStream};

/// Dials the control plane with a token supplier that is consulted per RPC.
#[derive(Clone)]
pub struct GrpcConnector {
    config: ChannelConfig,
    tokens: TokenSupplier,
}

impl GrpcConnector {
    pub fn new(config: ChannelConfig, tokens: TokenSupplier) -> Self {
        Self { config, tokens }
    }

    pub fn address(&self) -> &str {
        &self.config.address
    }
}

#[async_trait]
impl Connector for GrpcConnector {
    type Connection = YbConnection;

    async fn connect(&self) -> Result<YbConnection, GrpcClientError> {
        yb_grpc::connect(&self.config, self.tokens.clone()).await
    }
}

#[async_trait]
impl LogConnection for YbConnection {
    async fn open_stream(&mut self, target: &StreamTarget) -> Result<LogStream, tonic::Status> {
        let request = target.to_request();
        let streaming = match target.source() {
            LogSource::Runtime => self.app_log(request).await?,
            LogSource::Build => self.img_build_log(request).await?,
        };
        Ok(streaming.boxed())
    }
}
