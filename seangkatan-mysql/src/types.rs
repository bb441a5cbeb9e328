//! Parameter values bound to prepared statements.

use mysql_async::Value;
use serde_json::Value as JsonValue;

/// A value bound to a `?` placeholder.
///
/// Statements never interpolate values into SQL text; every caller builds a
/// list of these instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL `NULL`.
    Null,
    /// Boolean, stored by MySQL as `TINYINT(1)`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Text.
    Text(String),
    /// JSON document, bound as its serialized text.
    Json(JsonValue),
}

impl SqlValue {
    /// Whether this is `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<SqlValue> for Value {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Null => Value::NULL,
            SqlValue::Bool(b) => Value::from(b),
            SqlValue::Int(i) => Value::from(i),
            SqlValue::Text(s) => Value::from(s),
            SqlValue::Json(j) => Value::from(j.to_string()),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Int)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<JsonValue> for SqlValue {
    fn from(value: JsonValue) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
