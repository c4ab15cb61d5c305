//! Recording executor for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;

use sqldac_core::{Error, ExecResult, Executor, QueryErrorKind, Result, Row, Value};

/// Records every statement and answers from queued responses.
///
/// Queries pop the next queued row set (empty when none is queued); executes pop
/// the next queued outcome (one row affected when none is queued).
#[derive(Debug, Default)]
pub(crate) struct MockExecutor {
    statements: RefCell<Vec<(String, Vec<Value>)>>,
    rows: RefCell<VecDeque<Vec<Row>>>,
    outcomes: RefCell<VecDeque<ExecResult>>,
    failure: Option<String>,
}

impl MockExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_rows(self, columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let columns: Arc<[String]> = columns.iter().map(|c| (*c).to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|values| Row::new(Arc::clone(&columns), values))
            .collect();
        self.rows.borrow_mut().push_back(rows);
        self
    }

    pub(crate) fn with_count(self, count: i64) -> Self {
        self.with_rows(&["COUNT(*)"], vec![vec![Value::BigInt(count)]])
    }

    pub(crate) fn with_exec(self, outcome: ExecResult) -> Self {
        self.outcomes.borrow_mut().push_back(outcome);
        self
    }

    /// Fail every statement with a constraint error.
    pub(crate) fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub(crate) fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.statements.borrow().clone()
    }

    fn record(&self, sql: &str, params: &[Value]) -> Result<()> {
        self.statements
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));
        match &self.failure {
            Some(message) => Err(Error::query(QueryErrorKind::Constraint, message.clone())),
            None => Ok(()),
        }
    }
}

impl Executor for MockExecutor {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.record(sql, params)?;
        Ok(self.rows.borrow_mut().pop_front().unwrap_or_default())
    }

    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult> {
        self.record(sql, params)?;
        Ok(self
            .outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(ExecResult::new(1, None)))
    }
}
