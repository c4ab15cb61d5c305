//! Tables: schema, derived layout, reads and primary-key addressing.
//!
//! Write handlers live in [`crate::write`], the COUNT family in [`crate::count`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use sqldac_core::{
    COL_SEP_WIDE, Error, Executor, MissingValueError, Record, Result, Row, Value,
};
use sqldac_query::column_conditions;

use crate::context::{Context, State};
use crate::dataset::DataSet;
use crate::field::Field;
use crate::result::WriteResult;

/// Custom handler for Insert, Update or Delete.
///
/// A hook replaces the default handler entirely; it can still delegate to it,
/// e.g. `table.default_insert(ctx)`, after adjusting `ctx.record`.
pub type WriteHook = Arc<dyn for<'a> Fn(Context<'a>) -> Result<WriteResult<'a>> + Send + Sync>;

/// State derived from a table's fields by [`Table::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    columns: String,
    keys: Vec<String>,
    keys_map: HashMap<String, String>,
    primary_key: Vec<usize>,
    auto_increment: Option<usize>,
}

impl TableLayout {
    fn build(name: &str, fields: &[Field]) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::config("table name cannot be empty"));
        }

        let mut names = Vec::with_capacity(fields.len());
        let mut keys = Vec::with_capacity(fields.len());
        let mut keys_map = HashMap::with_capacity(fields.len());
        let mut primary_key = Vec::new();
        let mut auto_increment = None;

        for (i, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(Error::config(format!(
                    "table {name}: fields[{i}]: name cannot be empty"
                )));
            }
            names.push(field.name.as_str());
            let key = field.get_key().to_string();
            keys_map.insert(field.name.clone(), key.clone());
            keys.push(key);
            if field.primary_key {
                primary_key.push(i);
            }
            if auto_increment.is_none() && field.auto_increment {
                auto_increment = Some(i);
            }
        }

        let columns = if names.is_empty() {
            "*".to_string()
        } else {
            names.join(COL_SEP_WIDE)
        };

        Ok(Self {
            columns,
            keys,
            keys_map,
            primary_key,
            auto_increment,
        })
    }

    /// Column list used by SELECT, or `*` when the table declares no fields.
    pub fn columns(&self) -> &str {
        &self.columns
    }

    /// Record key of each field, in field order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Record key for a column name.
    pub fn key_of(&self, column: &str) -> Option<&str> {
        self.keys_map.get(column).map(String::as_str)
    }

    /// Indices of the primary-key fields.
    pub fn primary_key(&self) -> &[usize] {
        &self.primary_key
    }

    /// Index of the first auto-increment field.
    pub fn auto_increment(&self) -> Option<usize> {
        self.auto_increment
    }

    /// Map a result row to a record. Columns without a field keep their name.
    pub(crate) fn record_from_row(&self, row: Row) -> Record {
        row.into_pairs()
            .map(|(column, value)| match self.keys_map.get(&column) {
                Some(key) => (key.clone(), value),
                None => (column, value),
            })
            .collect()
    }
}

/// A named table described by an ordered list of fields.
///
/// # Example
///
/// ```
/// use sqldac::{Field, Table};
///
/// let users = Table::new("users")
///     .field(Field::new("id").primary_key().auto_increment())
///     .field(Field::new("name"));
/// assert_eq!(users.open().unwrap().columns(), "id, name");
/// ```
pub struct Table {
    name: String,
    fields: Vec<Field>,
    on_insert: Option<WriteHook>,
    on_update: Option<WriteHook>,
    on_delete: Option<WriteHook>,
    layout: OnceLock<TableLayout>,
}

impl Table {
    /// Create a table with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            on_insert: None,
            on_update: None,
            on_delete: None,
            layout: OnceLock::new(),
        }
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields_mut().push(field);
        self
    }

    /// Replace the handler for inserts.
    #[must_use]
    pub fn on_insert<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(Context<'a>) -> Result<WriteResult<'a>> + Send + Sync + 'static,
    {
        self.on_insert = Some(Arc::new(hook));
        self
    }

    /// Replace the handler for updates.
    #[must_use]
    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(Context<'a>) -> Result<WriteResult<'a>> + Send + Sync + 'static,
    {
        self.on_update = Some(Arc::new(hook));
        self
    }

    /// Replace the handler for deletes.
    #[must_use]
    pub fn on_delete<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(Context<'a>) -> Result<WriteResult<'a>> + Send + Sync + 'static,
    {
        self.on_delete = Some(Arc::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Mutable access to the fields. Closes the table so the next operation
    /// re-derives its layout.
    pub fn fields_mut(&mut self) -> &mut Vec<Field> {
        self.close();
        &mut self.fields
    }

    /// Look up a field by column name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Derive the layout if the table is not open yet, and return it.
    ///
    /// Fails when the table name or a field name is blank. Every other operation
    /// calls this first; calling it again while open is a no-op.
    pub fn open(&self) -> Result<&TableLayout> {
        if let Some(layout) = self.layout.get() {
            return Ok(layout);
        }
        let layout = TableLayout::build(&self.name, &self.fields)?;
        tracing::debug!(table = %self.name, columns = %layout.columns, "Opened table");
        Ok(self.layout.get_or_init(|| layout))
    }

    /// Drop the derived layout; the next operation rebuilds it.
    pub fn close(&mut self) {
        if self.layout.take().is_some() {
            tracing::trace!(table = %self.name, "Closed table");
        }
    }

    pub fn is_open(&self) -> bool {
        self.layout.get().is_some()
    }

    /// `SELECT <columns> FROM <table> <clauses>`.
    ///
    /// Result columns are keyed by their field's record key.
    pub fn select(
        &self,
        executor: &dyn Executor,
        clauses: &str,
        args: &[Value],
    ) -> Result<Vec<Record>> {
        let layout = self.open()?;
        let sql = format!("SELECT {} FROM {} {}", layout.columns, self.name, clauses);
        tracing::debug!(table = %self.name, sql = %sql, params = ?args, "Executing select");
        let rows = executor.query(&sql, args)?;
        Ok(rows.into_iter().map(|row| layout.record_from_row(row)).collect())
    }

    /// Insert a record through the hook, or [`default_insert`](Self::default_insert).
    pub fn insert<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        self.write(State::Insert, self, executor, record)
    }

    /// Update a record through the hook, or [`default_update`](Self::default_update).
    pub fn update<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        self.write(State::Update, self, executor, record)
    }

    /// Delete a record through the hook, or [`default_delete`](Self::default_delete).
    pub fn delete<'a>(
        &'a self,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        self.write(State::Delete, self, executor, record)
    }

    pub(crate) fn write<'a>(
        &'a self,
        state: State,
        data_set: &'a dyn DataSet,
        executor: &'a dyn Executor,
        record: &Record,
    ) -> Result<WriteResult<'a>> {
        self.open()?;
        let ctx = Context::new(state, executor, self, data_set, record.clone());
        let hook = match state {
            State::Insert => self.on_insert.as_ref(),
            State::Update => self.on_update.as_ref(),
            State::Delete => self.on_delete.as_ref(),
        };
        if let Some(hook) = hook {
            tracing::trace!(table = %self.name, state = %state, "Running write hook");
            return hook(ctx);
        }
        match state {
            State::Insert => self.default_insert(ctx),
            State::Update => self.default_update(ctx),
            State::Delete => self.default_delete(ctx),
        }
    }

    /// `<col> = ? AND ...` over the primary-key fields, with the record's values.
    ///
    /// Fails with a configuration error when the table has no primary key and
    /// with a missing-value error when the record lacks a key value.
    pub fn where_primary_key(&self, record: &Record) -> Result<(String, Vec<Value>)> {
        self.primary_key_condition(record, "=")
    }

    pub(crate) fn primary_key_condition(
        &self,
        record: &Record,
        op: &str,
    ) -> Result<(String, Vec<Value>)> {
        let layout = self.open()?;
        if layout.primary_key.is_empty() {
            return Err(Error::config(format!(
                "table {} does not define a primary key",
                self.name
            )));
        }

        let mut args = Vec::with_capacity(layout.primary_key.len());
        for &i in &layout.primary_key {
            let key = &layout.keys[i];
            let Some(value) = record.get(key) else {
                return Err(Error::MissingValue(MissingValueError {
                    table: self.name.clone(),
                    key: key.clone(),
                }));
            };
            args.push(value.clone());
        }

        let columns = layout
            .primary_key
            .iter()
            .map(|&i| self.fields[i].name.as_str());
        Ok((column_conditions(columns, op), args))
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("on_insert", &self.on_insert.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockExecutor;
    use sqldac_core::Value;

    fn users() -> Table {
        Table::new("users")
            .field(Field::new("id").primary_key().auto_increment())
            .field(Field::new("name"))
            .field(Field::new("email").key("mail"))
    }

    #[test]
    fn test_open_derives_layout() {
        let table = users();
        let layout = table.open().unwrap();
        assert_eq!(layout.columns(), "id, name, email");
        assert_eq!(layout.keys(), ["id", "name", "mail"]);
        assert_eq!(layout.key_of("email"), Some("mail"));
        assert_eq!(layout.primary_key(), [0]);
        assert_eq!(layout.auto_increment(), Some(0));
    }

    #[test]
    fn test_open_is_idempotent() {
        let table = users();
        let first: *const TableLayout = table.open().unwrap();
        let second: *const TableLayout = table.open().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_close_then_open_matches_fresh_table() {
        let mut table = users();
        table.open().unwrap();
        table.fields_mut().push(Field::new("age"));
        assert!(!table.is_open());
        let reopened = table.open().unwrap().clone();

        let fresh = users().field(Field::new("age"));
        assert_eq!(&reopened, fresh.open().unwrap());
        assert_eq!(reopened.columns(), "id, name, email, age");
    }

    #[test]
    fn test_open_without_fields_selects_star() {
        let table = Table::new("logs");
        assert_eq!(table.open().unwrap().columns(), "*");
        assert_eq!(table.open().unwrap().auto_increment(), None);
    }

    #[test]
    fn test_blank_names_rejected() {
        let err = Table::new("  ").open().unwrap_err();
        assert!(err.is_config());

        let table = Table::new("t").field(Field::new("a")).field(Field::new(""));
        let err = table.open().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("fields[1]"));
        assert!(!table.is_open());
    }

    #[test]
    fn test_select_maps_columns_to_keys() {
        let table = users();
        let db = MockExecutor::new().with_rows(
            &["id", "name", "email", "extra"],
            vec![vec![
                Value::BigInt(1),
                Value::from("a"),
                Value::from("a@x.com"),
                Value::from("z"),
            ]],
        );
        let records = table.select(&db, "WHERE id = ?", &[Value::BigInt(1)]).unwrap();

        assert_eq!(
            db.statements()[0].0,
            "SELECT id, name, email FROM users WHERE id = ?"
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("mail"), Some(&Value::from("a@x.com")));
        assert_eq!(records[0].get("extra"), Some(&Value::from("z")));
        assert!(!records[0].contains("email"));
    }

    #[test]
    fn test_select_tolerates_ragged_rows() {
        let table = users();
        let db = MockExecutor::new().with_rows(
            &["id"],
            vec![vec![Value::BigInt(1), Value::BigInt(2)]],
        );
        let records = table.select(&db, "", &[]).unwrap();
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("id"), Some(&Value::BigInt(1)));
    }

    #[test]
    fn test_where_primary_key_composite() {
        let table = Table::new("members")
            .field(Field::new("org_id").primary_key())
            .field(Field::new("user_id").primary_key().key("user"))
            .field(Field::new("role"));
        let record = Record::from([("org_id", 1_i64), ("user", 2_i64), ("role", 3_i64)]);
        let (sql, args) = table.where_primary_key(&record).unwrap();
        assert_eq!(sql, "org_id = ? AND user_id = ?");
        assert_eq!(args, vec![Value::BigInt(1), Value::BigInt(2)]);
    }

    #[test]
    fn test_where_primary_key_failures() {
        let no_pk = Table::new("t").field(Field::new("a"));
        assert!(no_pk.where_primary_key(&Record::from([("a", 1_i64)])).unwrap_err().is_config());

        let err = users().where_primary_key(&Record::from([("name", "a")])).unwrap_err();
        assert!(err.is_missing_value());
    }

    #[test]
    fn test_null_primary_key_value_is_present() {
        let (_, args) = users()
            .where_primary_key(&Record::new().with("id", Value::Null))
            .unwrap();
        assert_eq!(args, vec![Value::Null]);
    }
}
