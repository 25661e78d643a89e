//! Client side of the JetBrains plugin's HTTP API
//!
//! The plugin listens on a fixed loopback port. Every invocation sends
//! exactly one request through a [`Transport`]; nothing is retried.

pub mod http;
pub mod protocol;

pub use http::HttpTransport;
pub use protocol::{Method, PluginRequest, PluginResponse, routes};

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::error::{CodeNavResult, ConnectionError, PluginError};
use crate::models::config::PluginConfig;

/// Fixed address of the plugin's listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginTarget {
    host: IpAddr,
    port: u16,
    timeout: Duration,
}

impl PluginTarget {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl From<&PluginConfig> for PluginTarget {
    fn from(config: &PluginConfig) -> Self {
        Self::new(config.port, Duration::from_secs(config.timeout_secs))
    }
}

/// Sends one request and hands back whatever the plugin answered
pub trait Transport {
    fn send(&self, request: &PluginRequest) -> Result<PluginResponse, ConnectionError>;

    fn base_url(&self) -> String;
}

/// Turns transport results into command outcomes
pub struct PluginClient {
    transport: Box<dyn Transport>,
}

impl PluginClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> String {
        self.transport.base_url()
    }

    /// Send `request` once. A non-2xx reply becomes a [`PluginError`]
    /// carrying the response body as-is.
    pub fn call(&self, command: &str, request: &PluginRequest) -> CodeNavResult<Vec<u8>> {
        let response = self.transport.send(request)?;

        if !response.is_success() {
            tracing::debug!("{} rejected by plugin: HTTP {}", command, response.status);
            return Err(PluginError {
                command: command.to_string(),
                status: response.status,
                message: response.text().into_owned(),
            }
            .into());
        }

        Ok(response.body)
    }
}
