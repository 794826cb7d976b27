//! HTTP client implementation.

use reqwest::Request;
use std::sync::Arc;
use tracing::debug;

use crate::{HttpClientConfig, HttpClientError, RequestBuilder, Response, Result};

/// HTTP client that posts request bodies and buffers the response.
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(config.gzip)
            .build()
            .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(HttpClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Create a POST request builder for an absolute URL.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, url.into())
    }

    /// Execute a request once.
    pub(crate) async fn execute(&self, request: Request) -> Result<Response> {
        let timeout = request.timeout().copied().unwrap_or(self.config.timeout);

        debug!(
            method = %request.method(),
            url = %request.url(),
            timeout_ms = timeout.as_millis() as u64,
            "Sending request"
        );

        let response = self.inner.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                HttpClientError::Timeout(timeout)
            } else if e.is_connect() {
                HttpClientError::Connection(e.to_string())
            } else {
                HttpClientError::Http(e)
            }
        })?;

        let response = Response::from_reqwest(response).await?;
        debug!(status = %response.status(), bytes = response.bytes().len(), "Received response");

        Ok(response)
    }
}
