//! Filter construction error types.

use thiserror::Error;

/// Result type for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised while building a filter expression.
///
/// Every leaf filter is validated when it is constructed, so these are
/// the only failures the filter algebra can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Operator is not legal for the filter kind.
    #[error("Invalid operator {operator} for {target}")]
    InvalidOperator {
        /// The rejected operator token.
        operator: String,
        /// What the operator was applied to.
        target: String,
    },

    /// Operand has the wrong type, shape, length or range.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Platform code is not a known platform.
    #[error("Invalid platform code: {0}")]
    InvalidPlatform(u8),
}

impl FilterError {
    /// Check if this error was caused by the operator.
    pub fn is_invalid_operator(&self) -> bool {
        matches!(self, Self::InvalidOperator { .. })
    }

    /// Check if this error was caused by the operand.
    pub fn is_invalid_operand(&self) -> bool {
        matches!(self, Self::InvalidOperand(_))
    }
}
