//! Predicate values.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::QueryError;
use crate::types::datetime;

/// The closed set of values a predicate can compare against.
///
/// `Absent` is a first-class value: filters pass it through unchanged and the
/// predicate layer suppresses the expression that carries it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scalar {
    /// A numeric value, rendered unquoted.
    Int(i64),
    /// A textual value, rendered quoted and escaped.
    Text(String),
    /// No value was supplied.
    #[default]
    Absent,
}

impl Scalar {
    /// Returns true if this value contributes no SQL.
    ///
    /// Text is blank when nothing but whitespace remains after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Int(_) => false,
            Scalar::Text(text) => text.trim().is_empty(),
            Scalar::Absent => true,
        }
    }

    /// Returns a short name for the value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Text(_) => "text",
            Scalar::Absent => "absent",
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// Datetimes are handed to predicates in their canonical column format.
impl From<NaiveDateTime> for Scalar {
    fn from(value: NaiveDateTime) -> Self {
        Scalar::Text(datetime::format(&value))
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Absent, Into::into)
    }
}

impl TryFrom<&Value> for Scalar {
    type Error = QueryError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let type_name = match value {
            Value::Null => return Ok(Scalar::Absent),
            Value::String(text) => return Ok(Scalar::Text(text.clone())),
            Value::Number(number) => match number.as_i64() {
                Some(int) => return Ok(Scalar::Int(int)),
                None if number.is_u64() => "unsigned integer out of range",
                None => "float",
            },
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };

        Err(QueryError::UnsupportedValueType {
            type_name: type_name.to_string(),
        })
    }
}
