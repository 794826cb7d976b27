//! Request builder.

use crate::{HttpClient, HttpClientError, Response, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

/// POST request builder.
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    url: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
    error: Option<HttpClientError>,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(client: &'a HttpClient, url: String) -> Self {
        Self {
            client,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            error: None,
        }
    }

    /// Add a header to the request.
    ///
    /// An invalid header name or value fails the request when it is sent.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                self.error
                    .get_or_insert(HttpClientError::RequestBuild(format!("invalid header {name}")));
            }
        }
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a custom timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn build_url(&self) -> Result<Url> {
        Url::parse(&self.url).map_err(|e| HttpClientError::InvalidUrl(format!("{}: {e}", self.url)))
    }

    /// Send the request once.
    pub async fn send(self) -> Result<Response> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let url = self.build_url()?;
        let mut request = self.client.inner.post(url).headers(self.headers);

        if let Some(body) = self.body {
            request = request.body(body);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        self.client.execute(request.build()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_is_required() {
        let client = HttpClient::default_client().unwrap();

        let url = client
            .post("https://cp.pushwoosh.com/json/1.3/createMessage")
            .build_url()
            .unwrap();
        assert_eq!(url.path(), "/json/1.3/createMessage");

        assert!(client.post("/json/1.3/createMessage").build_url().is_err());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_on_send() {
        let client = HttpClient::default_client().unwrap();
        let err = client.post("not a url").send().await.unwrap_err();

        assert!(matches!(err, HttpClientError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_invalid_header_fails_on_send() {
        let client = HttpClient::default_client().unwrap();
        let err = client
            .post("http://127.0.0.1:9/")
            .header("bad header", "value")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, HttpClientError::RequestBuild(_)));
    }
}
