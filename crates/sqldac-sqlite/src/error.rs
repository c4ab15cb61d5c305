//! Mapping of `rusqlite` failures onto [`QueryError`].

use rusqlite::ErrorCode;

use sqldac_core::{Error, QueryError, QueryErrorKind};

/// Classify a `rusqlite` error and attach the statement that raised it.
pub(crate) fn query_error(err: rusqlite::Error, sql: Option<&str>) -> Error {
    let kind = match err.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => QueryErrorKind::Constraint,
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => QueryErrorKind::Busy,
        // SQLITE_ERROR: syntax errors, unknown tables or columns
        Some(ErrorCode::Unknown) => QueryErrorKind::Syntax,
        Some(_) => QueryErrorKind::Database,
        None => match &err {
            rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::Utf8Error(_) => QueryErrorKind::Decode,
            _ => QueryErrorKind::Database,
        },
    };

    let error = QueryError {
        kind,
        message: err.to_string(),
        sql: sql.map(str::to_string),
        source: Some(Box::new(err)),
    };
    Error::Query(error)
}
