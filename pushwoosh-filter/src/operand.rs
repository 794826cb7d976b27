//! Tag filter operand values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Date format used when rendering date operands.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Datetime format used when rendering datetime operands.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runtime type of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandType {
    /// Integer.
    Int,
    /// String.
    Str,
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// List of operands.
    List,
}

impl OperandType {
    /// Get type name for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperandType::Int => "int",
            OperandType::Str => "str",
            OperandType::Date => "date",
            OperandType::DateTime => "datetime",
            OperandType::List => "list",
        }
    }
}

impl fmt::Display for OperandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value compared against a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Integer value.
    Int(i64),
    /// String value.
    Str(String),
    /// Date value.
    Date(NaiveDate),
    /// Datetime value.
    DateTime(NaiveDateTime),
    /// List of values.
    List(Vec<Operand>),
}

impl Operand {
    /// Runtime type of this operand.
    pub fn operand_type(&self) -> OperandType {
        match self {
            Operand::Int(_) => OperandType::Int,
            Operand::Str(_) => OperandType::Str,
            Operand::Date(_) => OperandType::Date,
            Operand::DateTime(_) => OperandType::DateTime,
            Operand::List(_) => OperandType::List,
        }
    }

    /// Borrow list elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Operand]> {
        match self {
            Operand::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check if this operand is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Operand::List(_))
    }
}

/// Renders the operand in filter expression syntax: integers bare,
/// strings and dates double-quoted, lists bracketed and comma-joined.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(value) => write!(f, "{}", value),
            Operand::Str(value) => write!(f, "\"{}\"", value),
            Operand::Date(value) => write!(f, "\"{}\"", value.format(DATE_FORMAT)),
            Operand::DateTime(value) => write!(f, "\"{}\"", value.format(DATETIME_FORMAT)),
            Operand::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Serializes as plain JSON: integers as numbers, strings and dates as
/// strings, lists as arrays.
impl Serialize for Operand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Operand::Int(value) => serializer.serialize_i64(*value),
            Operand::Str(value) => serializer.serialize_str(value),
            Operand::Date(value) => serializer.collect_str(&value.format(DATE_FORMAT)),
            Operand::DateTime(value) => serializer.collect_str(&value.format(DATETIME_FORMAT)),
            Operand::List(items) => serializer.collect_seq(items),
        }
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Int(value.into())
    }
}

impl From<u32> for Operand {
    fn from(value: u32) -> Self {
        Operand::Int(value.into())
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Int(value.into())
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Str(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Str(value)
    }
}

impl From<NaiveDate> for Operand {
    fn from(value: NaiveDate) -> Self {
        Operand::Date(value)
    }
}

impl From<NaiveDateTime> for Operand {
    fn from(value: NaiveDateTime) -> Self {
        Operand::DateTime(value)
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Operand>, const N: usize> From<[T; N]> for Operand {
    fn from(values: [T; N]) -> Self {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}
