//! Result rows returned by an [`Executor`](crate::Executor).

use std::sync::Arc;

use crate::error::{Error, QueryErrorKind, Result};
use crate::value::Value;

/// One row of a result set: column names paired with values.
///
/// Column names are shared between the rows of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row. `values` line up with `columns`; values past the last
    /// column are never paired with a name.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a column index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Value of a named column.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|i| self.values.get(i))
    }

    /// First column as an integer; used for scalar queries such as `COUNT(*)`.
    pub fn scalar_i64(&self) -> Result<i64> {
        self.values.first().and_then(Value::as_i64).ok_or_else(|| {
            Error::query(
                QueryErrorKind::Decode,
                "expected an integer in the first column",
            )
        })
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Consume the row into `(column, value)` pairs.
    pub fn into_pairs(self) -> impl Iterator<Item = (String, Value)> {
        let columns = self.columns;
        self.values
            .into_iter()
            .enumerate()
            .filter_map(move |(i, v)| columns.get(i).map(|c| (c.clone(), v)))
    }
}
