//! Scalar cell values read from spreadsheet rows

use serde::{Deserialize, Serialize};

/// A single cell value in a row
///
/// Deserializes untagged so that schema files can write
/// `match_row_value = "Zhen"` or `match_row_value = 1` directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/absent cell
    #[default]
    Null,
    /// Boolean cell
    Bool(bool),
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text cell
    String(String),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// A value is empty when it is null or an empty string.
    ///
    /// Numbers (including zero) and booleans are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// String form used in composite keys and CSV cells.
    ///
    /// Null renders as the empty string.
    pub fn key_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Return a copy with trailing whitespace stripped from string values
    pub fn trim_end(&self) -> Value {
        match self {
            Value::String(s) => Value::String(s.trim_end().to_string()),
            other => other.clone(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "(null)"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
