//! The SQL execution contract.
//!
//! sqldac never opens connections or transactions itself. Everything it runs goes
//! through an [`Executor`], so a plain connection and an open transaction are
//! interchangeable and the caller decides the transactional scope.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::row::Row;
use crate::value::Value;

/// Positional placeholder token used in every generated statement.
pub const PLACEHOLDER: &str = "?";

/// Separator between items of column and placeholder lists.
pub const COL_SEP_WIDE: &str = ", ";

/// Executes parameterized SQL.
///
/// Implementations bind `params` positionally to `?` placeholders.
pub trait Executor {
    /// Run a query and return every row, in result-set order.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Run a query and return its first row, if any.
    fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        Ok(self.query(sql, params)?.into_iter().next())
    }

    /// Run a statement that does not produce rows.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).query(sql, params)
    }

    fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        (**self).query_one(sql, params)
    }

    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult> {
        (**self).execute(sql, params)
    }
}

/// Outcome of [`Executor::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecResult {
    /// Rows changed by the statement.
    pub rows_affected: u64,
    /// Identifier generated by the statement, when the driver reports one.
    pub last_insert_id: Option<i64>,
}

impl ExecResult {
    pub const fn new(rows_affected: u64, last_insert_id: Option<i64>) -> Self {
        Self {
            rows_affected,
            last_insert_id,
        }
    }
}
