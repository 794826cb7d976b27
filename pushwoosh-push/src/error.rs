//! Pushwoosh command error types.

use pushwoosh_filter::FilterError;
use pushwoosh_http_client::HttpClientError;
use thiserror::Error;

/// Result type for payload, command and client operations.
pub type Result<T> = std::result::Result<T, PushError>;

/// Errors raised while building, compiling or sending a command.
#[derive(Debug, Error)]
pub enum PushError {
    /// Invalid filter or condition (bad operator or operand).
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A required field was not set before compile.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Two mutually exclusive fields were both set.
    #[error("{first} and {second} are mutually exclusive")]
    MutuallyExclusive {
        /// First field name.
        first: &'static str,
        /// Second field name.
        second: &'static str,
    },

    /// A field value is malformed.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// Two aspects of one payload declare the same field.
    #[error("field {field} is declared by both {first} and {second}")]
    AspectConflict {
        /// Conflicting field name.
        field: &'static str,
        /// Aspect that declared the field first.
        first: &'static str,
        /// Aspect that declared it again.
        second: &'static str,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network, timeout or response decoding failure.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpClientError),
}

impl PushError {
    /// Check if this error was raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Filter(_)
                | Self::MissingField(_)
                | Self::MutuallyExclusive { .. }
                | Self::InvalidField { .. }
                | Self::AspectConflict { .. }
        )
    }

    /// Check if this error came from the transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Get the missing field name, if this is a missing field error.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PushError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
