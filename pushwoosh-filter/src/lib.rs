//! # Pushwoosh Filter
//!
//! Device-targeting filter expressions for the Pushwoosh remote API.
//!
//! Filters are write-only expression builders: leaves select devices by
//! application, application group or tag value, and leaves combine with
//! set operations into a tree that renders to the compact expression
//! language the server evaluates.
//!
//! ## Grammar
//!
//! ```text
//! A("<code>") | A("<code>", ["<platform>", ...])   application
//! G("<code>") | G("<code>", ["<platform>", ...])   application group
//! T("<tag>", <OPERATOR>, <operand>)                tag
//! AT("<app>", "<tag>", <OPERATOR>, <operand>)      tag within one application
//! (<expr> + <expr>)                                union
//! (<expr> * <expr>)                                intersect
//! (<expr> \ <expr>)                                subtract
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use pushwoosh_filter::{ApplicationFilter, Operator, Platform, SetOps, TagFilter};
//!
//! let ios_users = ApplicationFilter::application("0000-0000").platform(Platform::Ios);
//! let adults = TagFilter::integer("Age", Operator::Gte, 18)?;
//! let churned = TagFilter::days("Last Application Open", Operator::Gte, 30)?;
//!
//! let filter = ios_users.intersect(adults).subtract(churned);
//!
//! assert_eq!(
//!     filter.to_string(),
//!     r#"((A("0000-0000", ["iOS"]) * T("Age", GTE, 18)) \ T("Last Application Open", GTE, 30))"#
//! );
//! # Ok::<(), pushwoosh_filter::FilterError>(())
//! ```

mod error;
mod filter;
mod operand;
mod operator;
mod platform;
mod tag;
pub mod validators;

pub use error::{FilterError, Result};
pub use filter::{ApplicationFilter, ApplicationScope, Filter, SetOperation, SetOps};
pub use operand::{DATE_FORMAT, DATETIME_FORMAT, Operand, OperandType};
pub use operator::Operator;
pub use platform::{Platform, platform_names, valid_platform};
pub use tag::{TagFilter, ValueKind};

/// Prelude for common imports.
///
/// ```
/// use pushwoosh_filter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{FilterError, Result};
    pub use crate::filter::{ApplicationFilter, Filter, SetOps};
    pub use crate::operand::Operand;
    pub use crate::operator::Operator;
    pub use crate::platform::Platform;
    pub use crate::tag::{TagFilter, ValueKind};
}
