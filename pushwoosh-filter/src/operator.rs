//! Tag comparison operators.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{FilterError, OperandType};

/// Comparison operator used by tag filters and tag conditions.
///
/// Operators render as their bare identifiers (`EQ`, `BETWEEN`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Less than or equal.
    Lte,
    /// Greater than or equal.
    Gte,
    /// Equal.
    Eq,
    /// Not equal.
    NotEq,
    /// Inclusive range, operand is a two element list.
    Between,
    /// Membership, operand is a non-empty list.
    In,
    /// Non-membership, operand is a list.
    NotIn,
}

impl Operator {
    /// All operators.
    pub const ALL: [Operator; 7] = [
        Operator::Lte,
        Operator::Gte,
        Operator::Eq,
        Operator::NotEq,
        Operator::Between,
        Operator::In,
        Operator::NotIn,
    ];

    /// Get the wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Lte => "LTE",
            Operator::Gte => "GTE",
            Operator::Eq => "EQ",
            Operator::NotEq => "NOTEQ",
            Operator::Between => "BETWEEN",
            Operator::In => "IN",
            Operator::NotIn => "NOTIN",
        }
    }

    /// Operand shapes this operator accepts.
    ///
    /// Scalar operators take an integer, string, date or datetime; the
    /// set operators take a list.
    pub fn operand_types(&self) -> &'static [OperandType] {
        match self {
            Operator::Lte | Operator::Gte | Operator::Eq | Operator::NotEq => &[
                OperandType::Int,
                OperandType::Str,
                OperandType::Date,
                OperandType::DateTime,
            ],
            Operator::Between | Operator::In | Operator::NotIn => &[OperandType::List],
        }
    }

    /// Check if this operator takes a list operand.
    pub fn takes_list(&self) -> bool {
        matches!(self, Operator::Between | Operator::In | Operator::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FilterError::InvalidOperator {
                operator: s.to_string(),
                target: "tag filter".to_string(),
            })
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
