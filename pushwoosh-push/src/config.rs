//! Client configuration.

use std::collections::HashMap;
use std::time::Duration;

use crate::env::EnvLoader;
use crate::{PushError, Result};

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://cp.pushwoosh.com";

/// Default endpoint segment.
pub const DEFAULT_ENDPOINT: &str = "json";

/// Default API version segment.
pub const DEFAULT_VERSION: &str = "1.3";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PUSHWOOSH";

/// Pushwoosh client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `https://cp.pushwoosh.com`.
    pub base_url: String,
    /// First path segment.
    pub endpoint: String,
    /// API version path segment.
    pub version: String,
    /// Request timeout. `None` leaves the HTTP client default in place.
    pub timeout: Option<Duration>,
    /// User agent header.
    pub user_agent: String,
    /// Log request and response details at info level.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            timeout: None,
            user_agent: format!("pushwoosh-rs/{}", env!("CARGO_PKG_VERSION")),
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load from `PUSHWOOSH_*` environment variables.
    ///
    /// Recognized keys: `BASE_URL`, `ENDPOINT`, `API_VERSION`,
    /// `TIMEOUT_SECS`, `DEBUG`. Unset keys keep their defaults.
    pub fn from_env() -> Result<Self> {
        let loader = EnvLoader::new(Some(ENV_PREFIX.to_string()));
        Self::from_vars(&loader.load())
    }

    /// Build from already loaded variables, keyed without prefix.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = vars.get("BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(endpoint) = vars.get("ENDPOINT") {
            config.endpoint = endpoint.clone();
        }
        if let Some(version) = vars.get("API_VERSION") {
            config.version = version.clone();
        }
        if let Some(timeout) = vars.get("TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|_| {
                PushError::Config(format!("TIMEOUT_SECS must be a whole number, got {timeout:?}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(debug) = vars.get("DEBUG") {
            config.debug = parse_bool(debug)
                .ok_or_else(|| PushError::Config(format!("DEBUG must be a boolean, got {debug:?}")))?;
        }

        Ok(config)
    }

    /// Path for a route: `/<endpoint>/<version>/<route>`.
    pub fn path(&self, route: &str) -> String {
        format!("/{}/{}/{}", self.endpoint, self.version, route)
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ]
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set scheme and host.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the endpoint segment.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the API version segment.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable request and response logging at info level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://cp.pushwoosh.com");
        assert_eq!(config.path("createMessage"), "/json/1.3/createMessage");
        assert!(config.timeout.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_from_vars() {
        let config = ClientConfig::from_vars(&vars(&[
            ("BASE_URL", "http://localhost:8080/"),
            ("API_VERSION", "1.4"),
            ("TIMEOUT_SECS", "5"),
            ("DEBUG", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.path("setTags"), "/json/1.4/setTags");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(config.debug);
    }

    #[test]
    fn test_from_vars_rejects_bad_values() {
        let err = ClientConfig::from_vars(&vars(&[("TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, PushError::Config(_)));

        let err = ClientConfig::from_vars(&vars(&[("DEBUG", "maybe")])).unwrap_err();
        assert!(matches!(err, PushError::Config(_)));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("https://example.test/")
            .endpoint("api")
            .timeout(Duration::from_secs(2))
            .user_agent("test-agent")
            .build();

        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.path("pushStat"), "/api/1.3/pushStat");
        assert_eq!(config.headers()[0], ("User-Agent".to_string(), "test-agent".to_string()));
    }
}
