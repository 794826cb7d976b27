//! Tag filters.
//!
//! A tag filter compares a device tag against an operand. Each
//! [`ValueKind`] declares which operators and operand element types it
//! accepts; construction validates in a fixed order and fails on the
//! first violation:
//!
//! 1. operator membership
//! 2. operand shape for the operator
//! 3. operand element types
//! 4. list length for `BETWEEN` (exactly 2) and `IN` (at least 1)
//! 5. kind-specific checks (date parsing, positive days, boolean literal)

use std::fmt;

use crate::validators::{
    parse_date, valid_bool, valid_days, valid_operand, valid_operand_for_operator,
    valid_operand_list, valid_operator,
};
use crate::{FilterError, Operand, OperandType, Operator, Result};

const ALL_OPERATORS: &[Operator] = &[
    Operator::Lte,
    Operator::Gte,
    Operator::Eq,
    Operator::Between,
    Operator::In,
    Operator::NotEq,
    Operator::NotIn,
];

/// Value kind of a tag, which fixes its legal operators and operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Integer tag.
    Integer,
    /// String tag.
    String,
    /// List tag.
    List,
    /// Date tag. Operands are normalized at construction.
    Date,
    /// Days-since tag. Values must be positive.
    Days,
    /// Boolean tag.
    Boolean,
}

impl ValueKind {
    /// Operators legal for this kind.
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            ValueKind::Integer | ValueKind::Date | ValueKind::Days => ALL_OPERATORS,
            ValueKind::String => &[Operator::Eq, Operator::In, Operator::NotEq, Operator::NotIn],
            ValueKind::List => &[Operator::Eq, Operator::In],
            ValueKind::Boolean => &[Operator::Eq],
        }
    }

    /// Operand element types legal for this kind.
    pub fn value_types(&self) -> &'static [OperandType] {
        match self {
            ValueKind::Integer | ValueKind::Days => &[OperandType::Int],
            ValueKind::String | ValueKind::List | ValueKind::Boolean => {
                &[OperandType::Int, OperandType::Str]
            }
            ValueKind::Date => &[OperandType::Str, OperandType::Date, OperandType::DateTime],
        }
    }

    /// Get kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Date => "date",
            ValueKind::Days => "days",
            ValueKind::Boolean => "boolean",
        }
    }

    /// Validate an operator/operand pair, returning the operand to store.
    ///
    /// Only date operands are rewritten; every other kind stores the
    /// operand unchanged.
    pub fn validate(&self, operator: Operator, operand: Operand) -> Result<Operand> {
        if !valid_operator(operator, self.operators()) {
            return Err(FilterError::InvalidOperator {
                operator: operator.to_string(),
                target: format!("{} tag filter", self.as_str()),
            });
        }

        if !valid_operand_for_operator(&operand, operator) {
            return Err(FilterError::InvalidOperand(format!(
                "operand type {} is not valid for operator {}",
                operand.operand_type(),
                operator
            )));
        }

        match operand.as_list() {
            Some(items) if !valid_operand_list(items, self.value_types()) => {
                return Err(FilterError::InvalidOperand(format!(
                    "list value is not valid for {} tag filter",
                    self.as_str()
                )));
            }
            None if !valid_operand(&operand, self.value_types()) => {
                return Err(FilterError::InvalidOperand(format!(
                    "operand type {} is not valid for {} tag filter",
                    operand.operand_type(),
                    self.as_str()
                )));
            }
            _ => {}
        }

        let len = operand.as_list().map_or(0, <[Operand]>::len);
        if (operator == Operator::Between && len != 2) || (operator == Operator::In && len == 0) {
            return Err(FilterError::InvalidOperand(format!(
                "operand length {} is not valid for operator {}",
                len, operator
            )));
        }

        match self {
            ValueKind::Date => parse_date(&operand)
                .ok_or_else(|| FilterError::InvalidOperand("invalid date format".to_string())),
            ValueKind::Days if !valid_days(&operand) => Err(FilterError::InvalidOperand(
                "days count must be greater than 0".to_string(),
            )),
            ValueKind::Boolean if !valid_bool(&operand) => Err(FilterError::InvalidOperand(
                "boolean value must be 0, 1, \"true\" or \"false\"".to_string(),
            )),
            _ => Ok(operand),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag comparison, optionally scoped to one application.
///
/// Renders as `T("tag", OP, operand)`, or `AT("app", "tag", OP, operand)`
/// when scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    application: Option<String>,
    tag: String,
    kind: ValueKind,
    operator: Operator,
    operand: Operand,
}

impl TagFilter {
    /// Create a validated tag filter.
    pub fn new(
        kind: ValueKind,
        tag: impl Into<String>,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> Result<Self> {
        let operand = kind.validate(operator, operand.into())?;
        Ok(Self {
            application: None,
            tag: tag.into(),
            kind,
            operator,
            operand,
        })
    }

    /// Create a validated tag filter scoped to one application.
    pub fn for_application(
        application: impl Into<String>,
        kind: ValueKind,
        tag: impl Into<String>,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> Result<Self> {
        let mut filter = Self::new(kind, tag, operator, operand)?;
        filter.application = Some(application.into());
        Ok(filter)
    }

    /// Integer tag filter.
    pub fn integer(tag: impl Into<String>, operator: Operator, operand: impl Into<Operand>) -> Result<Self> {
        Self::new(ValueKind::Integer, tag, operator, operand)
    }

    /// String tag filter.
    pub fn string(tag: impl Into<String>, operator: Operator, operand: impl Into<Operand>) -> Result<Self> {
        Self::new(ValueKind::String, tag, operator, operand)
    }

    /// List tag filter.
    pub fn list(tag: impl Into<String>, operator: Operator, operand: impl Into<Operand>) -> Result<Self> {
        Self::new(ValueKind::List, tag, operator, operand)
    }

    /// Date tag filter.
    pub fn date(tag: impl Into<String>, operator: Operator, operand: impl Into<Operand>) -> Result<Self> {
        Self::new(ValueKind::Date, tag, operator, operand)
    }

    /// Days tag filter.
    pub fn days(tag: impl Into<String>, operator: Operator, operand: impl Into<Operand>) -> Result<Self> {
        Self::new(ValueKind::Days, tag, operator, operand)
    }

    /// Boolean tag filter.
    pub fn boolean(tag: impl Into<String>, operator: Operator, operand: impl Into<Operand>) -> Result<Self> {
        Self::new(ValueKind::Boolean, tag, operator, operand)
    }

    /// Application code, when scoped.
    pub fn application(&self) -> Option<&str> {
        self.application.as_deref()
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Stored operand, normalized for date kinds.
    pub fn operand(&self) -> &Operand {
        &self.operand
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.application {
            Some(application) => write!(
                f,
                "AT(\"{}\", \"{}\", {}, {})",
                application, self.tag, self.operator, self.operand
            ),
            None => write!(f, "T(\"{}\", {}, {})", self.tag, self.operator, self.operand),
        }
    }
}
