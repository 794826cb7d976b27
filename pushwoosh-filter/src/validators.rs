// Operand and operator validators

use chrono::{NaiveDate, NaiveDateTime};

use crate::operand::{DATE_FORMAT, DATETIME_FORMAT};
use crate::{Operand, OperandType, Operator};

/// Accepted datetime input layouts, tried in order.
const DATETIME_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Check that an operand has one of the given types.
pub fn valid_operand(operand: &Operand, types: &[OperandType]) -> bool {
    types.contains(&operand.operand_type())
}

/// Check that every element of a list operand has one of the given types.
pub fn valid_operand_list(operands: &[Operand], types: &[OperandType]) -> bool {
    operands.iter().all(|operand| valid_operand(operand, types))
}

/// Check operator membership.
pub fn valid_operator(operator: Operator, operators: &[Operator]) -> bool {
    operators.contains(&operator)
}

/// Check that the operand shape is legal for the operator.
pub fn valid_operand_for_operator(operand: &Operand, operator: Operator) -> bool {
    valid_operand(operand, operator.operand_types())
}

/// Days count must be a positive integer or a list of positive integers.
pub fn valid_days(operand: &Operand) -> bool {
    match operand {
        Operand::Int(days) => *days > 0,
        Operand::List(items) => items
            .iter()
            .all(|item| matches!(item, Operand::Int(days) if *days > 0)),
        _ => false,
    }
}

/// Boolean tags accept `0`, `1`, `"true"` or `"false"` (any case).
pub fn valid_bool(operand: &Operand) -> bool {
    match operand {
        Operand::Int(value) => matches!(value, 0 | 1),
        Operand::Str(value) => {
            let value = value.to_lowercase();
            value == "true" || value == "false"
        }
        _ => false,
    }
}

/// Normalize a date string.
///
/// Strings carrying a time of day become `YYYY-MM-DD HH:MM:SS`, date-only
/// strings become `YYYY-MM-DD`. Returns `None` when no layout matches.
pub fn normalize_date(value: &str) -> Option<String> {
    for format in DATETIME_INPUT_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.format(DATETIME_FORMAT).to_string());
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .map(|date| date.format(DATE_FORMAT).to_string())
}

/// Normalize a date operand to its string form.
///
/// Lists are normalized element-wise and fail if any element fails.
/// Integers never parse as dates.
pub fn parse_date(operand: &Operand) -> Option<Operand> {
    match operand {
        Operand::Str(value) => normalize_date(value).map(Operand::Str),
        Operand::Date(date) => Some(Operand::Str(date.format(DATE_FORMAT).to_string())),
        Operand::DateTime(datetime) => {
            Some(Operand::Str(datetime.format(DATETIME_FORMAT).to_string()))
        }
        Operand::List(items) => items
            .iter()
            .map(parse_date)
            .collect::<Option<Vec<_>>>()
            .map(Operand::List),
        Operand::Int(_) => None,
    }
}
