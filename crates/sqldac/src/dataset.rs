//! The [`DataSet`] capability and the pre-filtered [`View`].

use sqldac_core::{Executor, Record, Result, Value};

use crate::context::State;
use crate::result::WriteResult;
use crate::table::Table;

/// Something records can be selected from and written through.
///
/// [`Table`] is the canonical implementation; [`View`] is a pre-filtered one.
/// A [`WriteResult`] refreshes through the data set its write was issued on.
pub trait DataSet {
    /// Select records. `clauses` is appended verbatim after the FROM clause.
    fn select(&self, executor: &dyn Executor, clauses: &str, args: &[Value])
    -> Result<Vec<Record>>;

    fn insert<'a>(&'a self, executor: &'a dyn Executor, record: &Record)
    -> Result<WriteResult<'a>>;

    fn update<'a>(&'a self, executor: &'a dyn Executor, record: &Record)
    -> Result<WriteResult<'a>>;

    fn delete<'a>(&'a self, executor: &'a dyn Executor, record: &Record)
    -> Result<WriteResult<'a>>;
}

impl DataSet for Table {
    fn select(
        &self,
        executor: &dyn Executor,
        clauses: &str,
        args: &[Value],
    ) -> Result<Vec<Record>> {
        Table::select(self, executor, clauses, args)
    }

    fn insert<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        Table::insert(self, executor, record)
    }

    fn update<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        Table::update(self, executor, record)
    }

    fn delete<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        Table::delete(self, executor, record)
    }
}

/// A table seen through a fixed filter.
///
/// Selects wrap the table in a subquery:
/// `SELECT * FROM (SELECT <cols> FROM <table> WHERE <filter>) AS <alias> <clauses>`,
/// with the filter arguments bound before the caller's. Writes go to the table
/// unchanged, but their results refresh through the view.
#[derive(Debug, Clone)]
pub struct View<'t> {
    table: &'t Table,
    alias: String,
    filter: String,
    args: Vec<Value>,
}

impl<'t> View<'t> {
    /// Create a view over `table` restricted by `filter`.
    pub fn new(table: &'t Table, filter: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            table,
            alias: table.name().to_string(),
            filter: filter.into(),
            args,
        }
    }

    /// Name the subquery. Defaults to the table name.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn table(&self) -> &'t Table {
        self.table
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }
}

impl DataSet for View<'_> {
    fn select(
        &self,
        executor: &dyn Executor,
        clauses: &str,
        args: &[Value],
    ) -> Result<Vec<Record>> {
        let layout = self.table.open()?;
        let inner = if self.filter.trim().is_empty() {
            format!("SELECT {} FROM {}", layout.columns(), self.table.name())
        } else {
            format!(
                "SELECT {} FROM {} WHERE {}",
                layout.columns(),
                self.table.name(),
                self.filter
            )
        };
        let sql = format!("SELECT * FROM ({inner}) AS {} {clauses}", self.alias);
        let params: Vec<Value> = self.args.iter().chain(args).cloned().collect();
        tracing::debug!(table = %self.table.name(), sql = %sql, params = ?params, "Executing view select");
        let rows = executor.query(&sql, &params)?;
        Ok(rows.into_iter().map(|row| layout.record_from_row(row)).collect())
    }

    fn insert<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        self.table.write(State::Insert, self, executor, record)
    }

    fn update<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        self.table.write(State::Update, self, executor, record)
    }

    fn delete<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        self.table.write(State::Delete, self, executor, record)
    }
}
