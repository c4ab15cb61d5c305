//! Conversion between [`Value`] and SQLite storage classes.

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

use sqldac_core::{Error, QueryErrorKind, Result, Value};

/// Borrowed statement parameter.
#[derive(Debug)]
pub(crate) struct Param<'a>(pub(crate) &'a Value);

impl ToSql for Param<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Bool(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            Value::Int(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            Value::BigInt(v) | Value::Timestamp(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::Double(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
            Value::Json(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
        })
    }
}

/// Read a column value. Integers come back as [`Value::BigInt`], reals as
/// [`Value::Double`].
pub(crate) fn from_sql(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::BigInt(v),
        ValueRef::Real(v) => Value::Double(v),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(s) => Value::Text(s.to_string()),
            Err(e) => {
                return Err(Error::query(
                    QueryErrorKind::Decode,
                    format!("text column is not valid UTF-8: {e}"),
                ));
            }
        },
        ValueRef::Blob(bytes) => Value::Bytes(bytes.to_vec()),
    })
}
