//! Row and column labels

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::error::{Error, Result};

/// A hashable identifier naming one row or one column.
///
/// Labels are compared by exact equality only; an axis orders them by
/// insertion, never by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Bool(bool),
    Int(i64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Label {
    /// Label text, as used in headers
    pub fn name(&self) -> String {
        match self {
            Label::Bool(b) => b.to_string(),
            Label::Int(i) => i.to_string(),
            Label::Str(s) => s.clone(),
            Label::Date(d) => d.to_string(),
            Label::DateTime(dt) => dt.to_string(),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Str(s) => write!(f, "'{}'", s),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Str(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Str(s)
    }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self {
        Label::Str(s.clone())
    }
}

impl From<i64> for Label {
    fn from(i: i64) -> Self {
        Label::Int(i)
    }
}

impl From<i32> for Label {
    fn from(i: i32) -> Self {
        Label::Int(i64::from(i))
    }
}

impl From<bool> for Label {
    fn from(b: bool) -> Self {
        Label::Bool(b)
    }
}

impl From<NaiveDate> for Label {
    fn from(d: NaiveDate) -> Self {
        Label::Date(d)
    }
}

impl From<NaiveDateTime> for Label {
    fn from(dt: NaiveDateTime) -> Self {
        Label::DateTime(dt)
    }
}

impl From<&Label> for Label {
    fn from(label: &Label) -> Self {
        label.clone()
    }
}

impl TryFrom<Value> for Label {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(Label::Bool(b)),
            Value::Int(i) => Ok(Label::Int(i)),
            Value::String(s) => Ok(Label::Str(s.into_owned())),
            Value::Date(d) => Ok(Label::Date(d)),
            Value::DateTime(dt) => Ok(Label::DateTime(dt)),
            other => Err(Error::ShapeError(format!(
                "value {} cannot be used as a label",
                other
            ))),
        }
    }
}

/// Build a list of labels from anything convertible
pub fn labels<I, L>(items: I) -> Vec<Label>
where
    I: IntoIterator<Item = L>,
    L: Into<Label>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_value_round_trip() {
        for label in [Label::from(3), Label::from("a"), Label::from(true)] {
            let value = Value::from(label.clone());
            assert_eq!(Label::try_from(value).unwrap(), label);
        }
    }

    #[test]
    fn test_unlabelable_values() {
        assert!(matches!(
            Label::try_from(Value::Missing),
            Err(Error::ShapeError(_))
        ));
        assert!(Label::try_from(Value::Float(1.5)).is_err());
    }

    #[test]
    fn test_display_quotes_strings() {
        assert_eq!(Label::from("a").to_string(), "'a'");
        assert_eq!(Label::from(7).to_string(), "7");
        assert_eq!(Label::from("a").name(), "a");
    }
}
