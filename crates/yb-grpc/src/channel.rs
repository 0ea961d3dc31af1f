// ABOUTME: gRPC channel creation with keep-alive and TLS configuration.
// ABOUTME: Normalizes control-plane host strings into endpoints and dials them.

use std::time::Duration;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use crate::error::GrpcClientError;

/// HTTP/2 pings that keep an idle log tail's connection open.
///
/// Pings run while idle: a quiet tail has an open stream but no traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for KeepAlive {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(20),
        }
    }
}

/// Where and how to dial the control plane.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Dialable URL, always with a scheme.
    pub address: String,
    pub keep_alive: Option<KeepAlive>,
    pub connect_timeout: Option<Duration>,
    /// Derived from the scheme of `address`.
    pub use_tls: bool,
}

impl ChannelConfig {
    /// Create a channel config for a control-plane host.
    ///
    /// Accepts either a URL (`https://controller.example.io`) or a bare
    /// `host:port` pair; see [`normalize_host`].
    pub fn new(host: impl AsRef<str>) -> Self {
        let address = normalize_host(host.as_ref());
        let use_tls = address.to_lowercase().starts_with("https://");
        Self {
            address,
            keep_alive: Some(KeepAlive::default()),
            connect_timeout: Some(Duration::from_secs(15)),
            use_tls,
        }
    }

    pub fn without_keep_alive(mut self) -> Self {
        self.keep_alive = None;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

/// Turn a configured host into a dialable URL.
///
/// Hosts that already carry a scheme are kept as-is. Bare `host:443` gets
/// `https://`, any other bare host gets `http://`.
pub fn normalize_host(host: &str) -> String {
    let h = host.trim();
    let lower = h.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return h.to_string();
    }
    if h.ends_with(":443") {
        format!("https://{}", h)
    } else {
        format!("http://{}", h)
    }
}

/// Dial the control plane.
pub async fn create_channel(config: &ChannelConfig) -> Result<Channel, GrpcClientError> {
    let mut endpoint = Endpoint::from_shared(config.address.clone())
        .map_err(|e| GrpcClientError::InvalidAddress(e.to_string()))?;

    if config.use_tls {
        let tls = ClientTlsConfig::new().with_native_roots();
        endpoint = endpoint
            .tls_config(tls)
            .map_err(|e| GrpcClientError::ConnectionFailed(format!("tls setup: {e}")))?;
    }
    if let Some(keep_alive) = config.keep_alive {
        endpoint = endpoint
            .http2_keep_alive_interval(keep_alive.interval)
            .keep_alive_timeout(keep_alive.timeout)
            .keep_alive_while_idle(true);
    }
    if let Some(timeout) = config.connect_timeout {
        endpoint = endpoint.connect_timeout(timeout);
    }

    let channel = endpoint.connect().await?;
    tracing::debug!(address = %config.address, tls = config.use_tls, "channel connected");
    Ok(channel)
}
