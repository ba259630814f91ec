use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single cell of a [`Table`](crate::types::Table).
///
/// Source rows are decoded into `Value`s according to the declared
/// [`ColumnType`](crate::schema::ColumnType) of their column, so a cell is
/// never reinterpreted downstream. Missing database values decode to
/// `Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Null,
}

impl Value {
    /// Whether this cell maps to SQL NULL. NaN floats count as null so the
    /// warehouse never stores NaN.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// The surrogate id carried by this cell, if it is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}
