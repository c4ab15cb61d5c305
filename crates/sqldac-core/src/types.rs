//! Declared column types.

use serde::{Deserialize, Serialize};

/// The type a field declares for its column.
///
/// Values written through a field are conformed to this type before
/// validation; see [`Value::conform`](crate::Value::conform).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SqlType {
    /// No declared type; values pass through unchanged.
    #[default]
    Any,
    Bool,
    Integer,
    BigInt,
    Double,
    Text,
    Blob,
    Timestamp,
    Json,
}

impl SqlType {
    /// SQL name of the type.
    #[must_use]
    pub const fn sql_name(&self) -> &'static str {
        match self {
            SqlType::Any => "ANY",
            SqlType::Bool => "BOOLEAN",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Double => "DOUBLE",
            SqlType::Text => "TEXT",
            SqlType::Blob => "BLOB",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Json => "JSON",
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_name())
    }
}
