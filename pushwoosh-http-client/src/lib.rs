//! # Pushwoosh HTTP Client
//!
//! The JSON-over-HTTP transport used to talk to the Pushwoosh remote API.
//! It posts a prepared body to an absolute URL, buffers the response and
//! decodes it as JSON.
//!
//! ## Features
//!
//! - **Timeouts**: per-request and global timeout configuration
//! - **Compression**: automatic gzip support
//! - **Error mapping**: timeouts and refused connections get their own variants
//!
//! Requests are sent exactly once. Non-2xx responses are returned, not
//! raised, because the API reports its own status in the body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pushwoosh_http_client::{HttpClient, HttpClientConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpClientConfig::builder()
//!         .timeout(Duration::from_secs(30))
//!         .build();
//!
//!     let client = HttpClient::new(config)?;
//!
//!     let response = client
//!         .post("https://cp.pushwoosh.com/json/1.3/deleteMessage")
//!         .header("Content-Type", "application/json")
//!         .body(r#"{"request":{"auth":"token","message":"ABCD-1234"}}"#)
//!         .send()
//!         .await?;
//!
//!     let body: serde_json::Value = response.json()?;
//!     println!("{}: {body}", response.status());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;

pub use client::HttpClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use error::{HttpClientError, Result};
pub use request::RequestBuilder;
pub use response::Response;

pub use bytes::Bytes;
pub use http::StatusCode;
