//! HTTP response wrapper.

use crate::Result;
use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;

/// Buffered HTTP response.
///
/// The body is read fully before the response is handed back, so the
/// accessors below are synchronous.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    body: Bytes,
}

impl Response {
    /// Read a reqwest response to completion.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let body = response.bytes().await?;

        Ok(Self { status, body })
    }

    /// Build a response from a status and body. Mostly useful for test doubles.
    pub fn from_parts(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
