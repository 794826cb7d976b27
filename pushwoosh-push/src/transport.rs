//! Transport boundary between commands and the network.

use async_trait::async_trait;
use pushwoosh_http_client::HttpClient;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::Result;

/// One rendered command ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Absolute URL.
    pub url: String,
    /// JSON text.
    pub body: String,
    /// Headers sent with the request.
    pub headers: Vec<(String, String)>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

/// Posts JSON and returns the decoded JSON response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request once.
    async fn post(&self, request: TransportRequest) -> Result<Value>;
}

#[async_trait]
impl Transport for HttpClient {
    async fn post(&self, request: TransportRequest) -> Result<Value> {
        let mut builder = HttpClient::post(self, request.url.as_str()).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        if !response.is_success() {
            warn!(
                status = %response.status(),
                url = %request.url,
                "Pushwoosh API returned non-success status"
            );
        }

        Ok(response.json::<Value>()?)
    }
}
