//! Device selection aspects.

use pushwoosh_filter::validators::{valid_operand_for_operator, valid_operand_list};
use pushwoosh_filter::{
    ApplicationFilter, Filter, FilterError, Operand, OperandType, Operator, Platform, TagFilter,
};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::aspect::{Aspect, Fields, to_fields};
use crate::{PushError, Result};

/// Operand types allowed inside a condition's list value.
const SCALAR_TYPES: &[OperandType] = &[
    OperandType::Int,
    OperandType::Str,
    OperandType::Date,
    OperandType::DateTime,
];

/// Tag condition rendered as a `[tag, OPERATOR, value]` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    tag: String,
    operator: Operator,
    value: Operand,
}

impl Condition {
    /// Create a condition, checking the value shape against the operator.
    pub fn new(tag: impl Into<String>, operator: Operator, value: impl Into<Operand>) -> Result<Self> {
        let value = value.into();

        if !valid_operand_for_operator(&value, operator) {
            return Err(FilterError::InvalidOperand(format!(
                "{} does not accept a {} value",
                operator,
                value.operand_type()
            ))
            .into());
        }

        if let Some(items) = value.as_list()
            && !valid_operand_list(items, SCALAR_TYPES)
        {
            return Err(FilterError::InvalidOperand(format!(
                "{operator} list values must be scalars"
            ))
            .into());
        }

        match (operator, value.as_list()) {
            (Operator::Between, Some(items)) if items.len() != 2 => {
                return Err(FilterError::InvalidOperand(
                    "BETWEEN takes exactly two values".to_string(),
                )
                .into());
            }
            (Operator::In, Some([])) => {
                return Err(FilterError::InvalidOperand("IN takes at least one value".to_string()).into());
            }
            _ => {}
        }

        Ok(Self {
            tag: tag.into(),
            operator,
            value,
        })
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Comparison operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Compared value.
    pub fn value(&self) -> &Operand {
        &self.value
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.tag, self.operator, &self.value).serialize(serializer)
    }
}

/// Device selection for a notification inside `createMessage`.
///
/// `filter` names a filter saved on the server and is mutually exclusive
/// with `conditions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceSelection {
    /// Platforms to send to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<Platform>>,
    /// Push tokens to send to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,
    /// User ids to send to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    /// Name of a saved server-side filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Tag conditions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

impl Aspect for DeviceSelection {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn fields(&self) -> &'static [&'static str] {
        &["platforms", "devices", "users", "filter", "conditions"]
    }

    fn render(&self) -> Result<Fields> {
        if self.filter.is_some() && self.conditions.is_some() {
            return Err(PushError::MutuallyExclusive {
                first: "filter",
                second: "conditions",
            });
        }
        to_fields(self)
    }
}

/// Value of `devices_filter`: a filter expression or its literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevicesFilter {
    /// Filter expression tree.
    Expression(Filter),
    /// Expression text passed through as is.
    Raw(String),
}

impl fmt::Display for DevicesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevicesFilter::Expression(filter) => fmt::Display::fmt(filter, f),
            DevicesFilter::Raw(text) => f.write_str(text),
        }
    }
}

impl Serialize for DevicesFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Filter> for DevicesFilter {
    fn from(filter: Filter) -> Self {
        DevicesFilter::Expression(filter)
    }
}

impl From<ApplicationFilter> for DevicesFilter {
    fn from(filter: ApplicationFilter) -> Self {
        DevicesFilter::Expression(filter.into())
    }
}

impl From<TagFilter> for DevicesFilter {
    fn from(filter: TagFilter) -> Self {
        DevicesFilter::Expression(filter.into())
    }
}

impl From<&str> for DevicesFilter {
    fn from(text: &str) -> Self {
        DevicesFilter::Raw(text.to_string())
    }
}

impl From<String> for DevicesFilter {
    fn from(text: String) -> Self {
        DevicesFilter::Raw(text)
    }
}

/// Required `devices_filter` aspect of targeted commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicesFilterField {
    /// Audience expression. Compiling fails while it is unset.
    pub devices_filter: Option<DevicesFilter>,
}

impl Aspect for DevicesFilterField {
    fn name(&self) -> &'static str {
        "devices_filter"
    }

    fn fields(&self) -> &'static [&'static str] {
        &["devices_filter"]
    }

    fn render(&self) -> Result<Fields> {
        let filter = self
            .devices_filter
            .as_ref()
            .ok_or(PushError::MissingField("devices_filter"))?;

        let mut fields = Fields::new();
        fields.insert("devices_filter".to_string(), Value::String(filter.to_string()));
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushwoosh_filter::SetOps;
    use serde_json::json;

    #[test]
    fn test_condition_renders_as_triple() {
        let condition = Condition::new("Age", Operator::Between, [18, 30]).unwrap();
        assert_eq!(serde_json::to_value(&condition).unwrap(), json!(["Age", "BETWEEN", [18, 30]]));

        let condition = Condition::new("City", Operator::Eq, "Berlin").unwrap();
        assert_eq!(serde_json::to_value(&condition).unwrap(), json!(["City", "EQ", "Berlin"]));
    }

    #[test]
    fn test_condition_rejects_bad_shapes() {
        let err = Condition::new("Age", Operator::Gte, [1, 2]).unwrap_err();
        assert!(matches!(err, PushError::Filter(FilterError::InvalidOperand(_))));

        assert!(Condition::new("Age", Operator::Between, [1]).is_err());
        assert!(Condition::new("City", Operator::In, Vec::<&str>::new()).is_err());
        assert!(Condition::new("City", Operator::NotIn, Vec::<&str>::new()).is_ok());
    }

    #[test]
    fn test_condition_rejects_nested_lists() {
        let nested = Operand::List(vec![Operand::List(vec![Operand::from(1)])]);
        let err = Condition::new("Level", Operator::In, nested).unwrap_err();
        assert!(matches!(err, PushError::Filter(FilterError::InvalidOperand(_))));

        let nested = Operand::List(vec![Operand::from(1), Operand::List(vec![Operand::from(2)])]);
        assert!(Condition::new("Level", Operator::Between, nested).is_err());

        assert!(Condition::new("Level", Operator::In, [1, 2]).is_ok());
    }

    #[test]
    fn test_selection_renders_set_fields() {
        let selection = DeviceSelection {
            platforms: Some(vec![Platform::Ios, Platform::Android]),
            users: Some(vec!["user_1".into(), "user_2".into()]),
            ..Default::default()
        };

        assert_eq!(
            Value::Object(selection.render().unwrap()),
            json!({"platforms": [1, 3], "users": ["user_1", "user_2"]})
        );
    }

    #[test]
    fn test_filter_and_conditions_are_exclusive() {
        let selection = DeviceSelection {
            filter: Some("Paying users".into()),
            conditions: Some(vec![Condition::new("Level", Operator::Gte, 10).unwrap()]),
            ..Default::default()
        };

        assert!(matches!(
            selection.render(),
            Err(PushError::MutuallyExclusive {
                first: "filter",
                second: "conditions"
            })
        ));
    }

    #[test]
    fn test_devices_filter_is_a_json_string() {
        let field = DevicesFilterField {
            devices_filter: Some(
                ApplicationFilter::application("0000-0000")
                    .union(ApplicationFilter::group("1111-1111"))
                    .into(),
            ),
        };

        assert_eq!(
            Value::Object(field.render().unwrap()),
            json!({"devices_filter": r#"(A("0000-0000") + G("1111-1111"))"#})
        );
    }

    #[test]
    fn test_raw_devices_filter_passes_through() {
        let field = DevicesFilterField {
            devices_filter: Some(r#"T("Age", GTE, 18)"#.into()),
        };
        assert_eq!(field.render().unwrap()["devices_filter"], r#"T("Age", GTE, 18)"#);
    }

    #[test]
    fn test_missing_devices_filter() {
        let err = DevicesFilterField::default().render().unwrap_err();
        assert_eq!(err.missing_field(), Some("devices_filter"));
    }
}
