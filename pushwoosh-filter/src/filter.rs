//! Filter expression tree.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::platform::platform_names;
use crate::{Platform, TagFilter};

/// Whether an [`ApplicationFilter`] selects one application or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationScope {
    /// Single application, rendered with prefix `A`.
    Application,
    /// Application group, rendered with prefix `G`.
    Group,
}

impl ApplicationScope {
    /// Expression prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            ApplicationScope::Application => "A",
            ApplicationScope::Group => "G",
        }
    }
}

/// Selects the devices of an application or application group,
/// optionally narrowed to some platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFilter {
    scope: ApplicationScope,
    code: String,
    platforms: Option<Vec<Platform>>,
}

impl ApplicationFilter {
    /// Filter by application code.
    pub fn application(code: impl Into<String>) -> Self {
        Self {
            scope: ApplicationScope::Application,
            code: code.into(),
            platforms: None,
        }
    }

    /// Filter by application group code.
    pub fn group(code: impl Into<String>) -> Self {
        Self {
            scope: ApplicationScope::Group,
            code: code.into(),
            platforms: None,
        }
    }

    /// Restrict to the given platforms.
    pub fn platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms = Some(platforms.into_iter().collect());
        self
    }

    /// Restrict to a single platform.
    pub fn platform(self, platform: Platform) -> Self {
        self.platforms([platform])
    }

    /// Application or group scope.
    pub fn scope(&self) -> ApplicationScope {
        self.scope
    }

    /// Application or group code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ApplicationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\"", self.scope.prefix(), self.code)?;
        if let Some(platforms) = &self.platforms {
            write!(f, ", [\"{}\"]", platform_names(platforms).join("\", \""))?;
        }
        f.write_str(")")
    }
}

/// Binary set operation joining two filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperation {
    /// Devices matching either side.
    Union,
    /// Devices matching both sides.
    Intersect,
    /// Devices matching the left side but not the right.
    Subtract,
}

impl SetOperation {
    /// Operation sign in expression syntax.
    pub fn sign(&self) -> &'static str {
        match self {
            SetOperation::Union => "+",
            SetOperation::Intersect => "*",
            SetOperation::Subtract => "\\",
        }
    }
}

/// Device-targeting filter expression.
///
/// Leaves are validated when built; combining never mutates either
/// operand, it wraps both in a new node. Every binary node renders
/// parenthesized, so the output is unambiguous at any depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Application or application group.
    Application(ApplicationFilter),
    /// Tag comparison.
    Tag(TagFilter),
    /// Two filters joined by a set operation.
    Combined {
        /// Operation.
        operation: SetOperation,
        /// Left operand.
        left: Box<Filter>,
        /// Right operand.
        right: Box<Filter>,
    },
}

impl Filter {
    fn combine(operation: SetOperation, left: Filter, right: Filter) -> Self {
        Filter::Combined {
            operation,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Check if this is a leaf filter.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Filter::Combined { .. })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Application(filter) => fmt::Display::fmt(filter, f),
            Filter::Tag(filter) => fmt::Display::fmt(filter, f),
            Filter::Combined {
                operation,
                left,
                right,
            } => write!(f, "({} {} {})", left, operation.sign(), right),
        }
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<ApplicationFilter> for Filter {
    fn from(filter: ApplicationFilter) -> Self {
        Filter::Application(filter)
    }
}

impl From<TagFilter> for Filter {
    fn from(filter: TagFilter) -> Self {
        Filter::Tag(filter)
    }
}

/// Set operations available on every filter value.
///
/// ```
/// use pushwoosh_filter::{ApplicationFilter, Operator, SetOps, TagFilter};
///
/// let app = ApplicationFilter::application("0000-0000");
/// let tag = TagFilter::string("city", Operator::Eq, "Berlin").unwrap();
///
/// assert_eq!(
///     app.union(tag).to_string(),
///     r#"(A("0000-0000") + T("city", EQ, "Berlin"))"#
/// );
/// ```
pub trait SetOps: Into<Filter> {
    /// Devices matching either filter.
    fn union(self, other: impl Into<Filter>) -> Filter {
        Filter::combine(SetOperation::Union, self.into(), other.into())
    }

    /// Devices matching both filters.
    fn intersect(self, other: impl Into<Filter>) -> Filter {
        Filter::combine(SetOperation::Intersect, self.into(), other.into())
    }

    /// Devices matching this filter but not the other.
    fn subtract(self, other: impl Into<Filter>) -> Filter {
        Filter::combine(SetOperation::Subtract, self.into(), other.into())
    }
}

impl<T: Into<Filter>> SetOps for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Operator;

    #[test]
    fn test_application_filter() {
        let filter = ApplicationFilter::application("0000-0000");
        assert_eq!(filter.to_string(), "A(\"0000-0000\")");
    }

    #[test]
    fn test_application_filter_with_platforms() {
        let filter = ApplicationFilter::application("0000-0000")
            .platforms([Platform::Ios, Platform::Android]);
        assert_eq!(filter.to_string(), "A(\"0000-0000\", [\"iOS\", \"Android\"])");
    }

    #[test]
    fn test_group_filter() {
        let filter = ApplicationFilter::group("0000-0000").platform(Platform::Mac);
        assert_eq!(filter.to_string(), "G(\"0000-0000\", [\"OS_X\"])");
        assert_eq!(filter.scope(), ApplicationScope::Group);
    }

    #[test]
    fn test_combinators_nest_left() {
        let tag = TagFilter::string("test_string", Operator::Eq, "test value").unwrap();
        let app = ApplicationFilter::application("0000-0000");

        let filter = app
            .clone()
            .union(tag.clone())
            .intersect(app)
            .subtract(tag);

        assert_eq!(
            filter.to_string(),
            r#"(((A("0000-0000") + T("test_string", EQ, "test value")) * A("0000-0000")) \ T("test_string", EQ, "test value"))"#
        );
    }

    #[test]
    fn test_right_nesting_is_parenthesized() {
        let a = ApplicationFilter::application("a");
        let b = ApplicationFilter::application("b");
        let c = ApplicationFilter::group("c");

        let filter = a.union(b.intersect(c));
        assert_eq!(filter.to_string(), r#"(A("a") + (A("b") * G("c")))"#);
        assert!(!filter.is_leaf());
    }

    #[test]
    fn test_combining_does_not_touch_operands() {
        let left: Filter = ApplicationFilter::application("x").into();
        let snapshot = left.clone();
        let combined = left.clone().union(ApplicationFilter::application("y"));

        assert_eq!(left, snapshot);
        match combined {
            Filter::Combined { left: inner, .. } => assert_eq!(*inner, snapshot),
            other => panic!("unexpected filter {other}"),
        }
    }

    #[test]
    fn test_serializes_as_expression_string() {
        let filter = ApplicationFilter::application("0000-0000").union(ApplicationFilter::group("g"));
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json, serde_json::json!("(A(\"0000-0000\") + G(\"g\"))"));
    }
}
