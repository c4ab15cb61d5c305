//! Per-operation context handed to hooks and validation rules.

use std::fmt;

use sqldac_core::{Executor, Record};

use crate::dataset::DataSet;
use crate::field::Field;
use crate::table::Table;

/// The write operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Insert,
    Update,
    Delete,
}

impl State {
    pub const fn as_str(&self) -> &'static str {
        match self {
            State::Insert => "insert",
            State::Update => "update",
            State::Delete => "delete",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a hook or rule may need to know about the current write.
///
/// A context is created fresh for each operation (and for each field validated)
/// and lives only as long as the call it is passed to, or the
/// [`WriteResult`](crate::WriteResult) that keeps its final snapshot.
#[derive(Clone)]
pub struct Context<'a> {
    pub state: State,
    pub executor: &'a dyn Executor,
    pub table: &'a Table,
    /// The data set the write was issued through; refreshes read through it.
    pub data_set: &'a dyn DataSet,
    /// The working record.
    pub record: Record,
    /// The field under validation, if any.
    pub field: Option<&'a Field>,
}

impl<'a> Context<'a> {
    pub fn new(
        state: State,
        executor: &'a dyn Executor,
        table: &'a Table,
        data_set: &'a dyn DataSet,
        record: Record,
    ) -> Self {
        Self {
            state,
            executor,
            table,
            data_set,
            record,
            field: None,
        }
    }

    /// Same operation, empty record, no field.
    pub(crate) fn clone_without_record(&self) -> Context<'a> {
        Context {
            state: self.state,
            executor: self.executor,
            table: self.table,
            data_set: self.data_set,
            record: Record::new(),
            field: None,
        }
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state)
            .field("table", &self.table.name())
            .field("record", &self.record)
            .field("field", &self.field.map(|field| field.name.as_str()))
            .finish_non_exhaustive()
    }
}
