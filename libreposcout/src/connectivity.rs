//! Network availability checks

use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::ConnectivityConfig;

/// Answers whether the network is reachable before a search is attempted
#[async_trait]
pub trait ConnectivityCheck: Send + Sync {
    async fn is_available(&self) -> bool;
}

/// Always reports the network as available (test configuration)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

#[async_trait]
impl ConnectivityCheck for AlwaysOnline {
    async fn is_available(&self) -> bool {
        true
    }
}

/// Always reports the network as unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOffline;

#[async_trait]
impl ConnectivityCheck for AlwaysOffline {
    async fn is_available(&self) -> bool {
        false
    }
}

/// Probes connectivity by opening a TCP connection to the API host
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    pub fn from_config(config: &ConnectivityConfig) -> Self {
        Self::new(config.probe_host.clone(), config.probe_port, config.timeout())
    }
}

#[async_trait]
impl ConnectivityCheck for TcpProbe {
    async fn is_available(&self) -> bool {
        let address = (self.host.as_str(), self.port);
        match timeout(self.timeout, TcpStream::connect(address)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!("Connectivity probe to {}:{} failed: {}", self.host, self.port, e);
                false
            }
            Err(_) => {
                tracing::debug!("Connectivity probe to {}:{} timed out", self.host, self.port);
                false
            }
        }
    }
}
