//! Dynamic SQL values.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::types::SqlType;

/// A loosely typed SQL value, used for parameters and record entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// SQL NULL.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    BigInt(i64),
    /// Double precision float.
    Double(f64),
    /// Text.
    Text(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Microseconds since the Unix epoch.
    Timestamp(i64),
    /// A JSON document.
    Json(serde_json::Value),
}

impl Value {
    /// The current wall-clock time as a [`Value::Timestamp`].
    pub fn now() -> Self {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX))
            .unwrap_or_default();
        Value::Timestamp(micros)
    }

    /// Check if this value is NULL.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret this value as an `i64`, if it is integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(i64::from(*v)),
            Value::BigInt(v) | Value::Timestamp(v) => Some(*v),
            Value::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Interpret this value as an `f64`, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(f64::from(*v)),
            Value::BigInt(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Interpret this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::Int(v) => Some(*v != 0),
            Value::BigInt(v) => Some(*v != 0),
            _ => None,
        }
    }

    /// Conform this value to a declared column type.
    ///
    /// Returns `None` when the value cannot represent the type. NULL conforms to
    /// every type, and [`SqlType::Any`] accepts every value unchanged.
    pub fn conform(&self, ty: SqlType) -> Option<Value> {
        if self.is_null() {
            return Some(Value::Null);
        }
        match ty {
            SqlType::Any => Some(self.clone()),
            SqlType::Bool => match self {
                Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "1" => Some(Value::Bool(true)),
                    "false" | "0" => Some(Value::Bool(false)),
                    _ => None,
                },
                other => other.as_bool().map(Value::Bool),
            },
            SqlType::Integer => match self {
                Value::Int(v) => Some(Value::Int(*v)),
                Value::BigInt(v) => i32::try_from(*v).ok().map(Value::Int),
                Value::Bool(v) => Some(Value::Int(i32::from(*v))),
                Value::Text(s) => s.trim().parse().ok().map(Value::Int),
                _ => None,
            },
            SqlType::BigInt => match self {
                Value::Text(s) => s.trim().parse().ok().map(Value::BigInt),
                Value::Timestamp(_) | Value::Double(_) => None,
                other => other.as_i64().map(Value::BigInt),
            },
            SqlType::Double => match self {
                Value::Text(s) => s.trim().parse().ok().map(Value::Double),
                other => other.as_f64().map(Value::Double),
            },
            SqlType::Text => match self {
                Value::Text(s) => Some(Value::Text(s.clone())),
                _ => None,
            },
            SqlType::Blob => match self {
                Value::Bytes(b) => Some(Value::Bytes(b.clone())),
                Value::Text(s) => Some(Value::Bytes(s.as_bytes().to_vec())),
                _ => None,
            },
            SqlType::Timestamp => match self {
                Value::Timestamp(v) | Value::BigInt(v) => Some(Value::Timestamp(*v)),
                _ => None,
            },
            SqlType::Json => match self {
                Value::Json(j) => Some(Value::Json(j.clone())),
                Value::Text(s) => serde_json::from_str(s).ok().map(Value::Json),
                _ => None,
            },
        }
    }

    /// Convert to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Int(v) => serde_json::Value::from(*v),
            Value::BigInt(v) | Value::Timestamp(v) => serde_json::Value::from(*v),
            Value::Double(v) => serde_json::Value::from(*v),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::from(b.clone()),
            Value::Json(j) => j.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
