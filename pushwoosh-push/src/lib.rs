//! # Pushwoosh Push
//!
//! Notification payloads, API commands and an async client for the
//! Pushwoosh remote API.
//!
//! ## Features
//!
//! - **Aspects**: common, per-platform and device selection fields composed
//!   into one payload, with overlap detection
//! - **Commands**: every remote API call wrapped in a `{"request": ...}`
//!   envelope, validated at compile time
//! - **Filters**: audience expressions from `pushwoosh-filter`
//! - **Transport**: pluggable, with an [`HttpClient`](pushwoosh_http_client::HttpClient)
//!   implementation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pushwoosh_push::prelude::*;
//! use pushwoosh_filter::{ApplicationFilter, Operator, SetOps, TagFilter};
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let client = PushwooshClient::from_env()?;
//!
//!     let audience = ApplicationFilter::application("0000-0000")
//!         .intersect(TagFilter::integer("Level", Operator::Gte, 10)?);
//!
//!     let command = CreateTargetedMessageCommand::new()
//!         .auth("api-token")
//!         .content("You reached level 10!")
//!         .devices_filter(audience);
//!
//!     let response = client.invoke(&command).await?;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```

pub mod aspect;
mod client;
mod command;
mod config;
mod env;
mod error;
mod notification;
mod platform;
mod selection;
mod transport;

pub use aspect::{Aspect, Fields, compose};
pub use client::PushwooshClient;
pub use command::{
    Command, CommandKind, CompileFilterCommand, CreateMessageCommand,
    CreateTargetedMessageCommand, DeleteMessageCommand, DeviceTarget, GetNearestZoneCommand,
    PushStatCommand, RegisterDeviceCommand, SetBadgeCommand, SetTagsCommand,
    UnregisterDeviceCommand,
};
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_VERSION,
    ENV_PREFIX,
};
pub use env::EnvLoader;
pub use error::{PushError, Result};
pub use notification::{
    CommonFields, Content, LinkMinimizer, MessageFields, Notification, SEND_DATE_FORMAT, SendDate,
};
pub use platform::{
    AmazonFields, AndroidFields, BlackBerryFields, ChromeFields, IosFields, MacFields,
    PlatformFields, SafariFields, WindowsFields, WindowsPhoneFields,
};
pub use selection::{Condition, DeviceSelection, DevicesFilter, DevicesFilterField};
pub use transport::{Transport, TransportRequest};

/// Prelude for common imports.
///
/// ```
/// use pushwoosh_push::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::PushwooshClient;
    pub use crate::command::{
        Command, CompileFilterCommand, CreateMessageCommand, CreateTargetedMessageCommand,
        DeleteMessageCommand,
    };
    pub use crate::config::ClientConfig;
    pub use crate::error::{PushError, Result};
    pub use crate::notification::{Content, MessageFields, Notification, SendDate};
    pub use crate::selection::Condition;
}
