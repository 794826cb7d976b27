//! Pushwoosh API client.

use pushwoosh_http_client::{HttpClient, HttpClientConfig};
use serde_json::Value;
use tracing::{debug, info};

use crate::command::Command;
use crate::config::ClientConfig;
use crate::transport::{Transport, TransportRequest};
use crate::Result;

/// Sends commands to the remote API.
///
/// Every command is fully validated and rendered before the transport is
/// called, so a validation error never reaches the network. The decoded
/// response body is returned unmodified.
pub struct PushwooshClient<T: Transport = HttpClient> {
    config: ClientConfig,
    transport: T,
}

impl PushwooshClient<HttpClient> {
    /// Create a client backed by [`HttpClient`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut http = HttpClientConfig::builder()
            .user_agent(config.user_agent.clone())
            .gzip(true);
        if let Some(timeout) = config.timeout {
            http = http.timeout(timeout);
        }

        let transport = HttpClient::new(http.build())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client configured from `PUSHWOOSH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> PushwooshClient<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Request path for a command.
    pub fn path(&self, command: &dyn Command) -> String {
        self.config.path(command.kind().route())
    }

    /// Absolute URL for a command.
    pub fn url(&self, command: &dyn Command) -> String {
        format!("{}{}", self.config.base_url, self.path(command))
    }

    /// Render `command` and post it.
    pub async fn invoke(&self, command: &dyn Command) -> Result<Value> {
        let body = command.render()?;
        let url = self.url(command);
        let headers = self.config.headers();

        debug!(command = %command.kind(), url = %url, bytes = body.len(), "Posting command");
        if self.config.debug {
            info!(url = %url, headers = ?headers, body = %body, "Pushwoosh request");
        }

        let response = self
            .transport
            .post(TransportRequest {
                url,
                body,
                headers,
                timeout: self.config.timeout,
            })
            .await?;

        if self.config.debug {
            info!(response = %response, "Pushwoosh response");
        }

        Ok(response)
    }
}
