//! Outcome of a write operation.

use sqldac_core::{Error, ExecResult, QueryErrorKind, Record, Result, Value};
use sqldac_query::Selector;

use crate::context::{Context, State};

/// Returned by Insert, Update and Delete.
///
/// Holds the execution outcome and the context of the write, whose record is the
/// fully resolved row that was sent to the store (the caller's record for
/// deletes).
#[derive(Debug)]
pub struct WriteResult<'a> {
    context: Context<'a>,
    outcome: ExecResult,
}

impl<'a> WriteResult<'a> {
    pub fn new(context: Context<'a>, outcome: ExecResult) -> Self {
        Self { context, outcome }
    }

    pub fn context(&self) -> &Context<'a> {
        &self.context
    }

    pub fn state(&self) -> State {
        self.context.state
    }

    /// The record as written.
    pub fn snapshot(&self) -> &Record {
        &self.context.record
    }

    pub fn outcome(&self) -> ExecResult {
        self.outcome
    }

    pub fn rows_affected(&self) -> u64 {
        self.outcome.rows_affected
    }

    pub fn last_insert_id(&self) -> Option<i64> {
        self.outcome.last_insert_id
    }

    /// The written record, re-read from storage when `refresh` is set.
    ///
    /// Without refresh this is a copy of [`snapshot`](Self::snapshot). With
    /// refresh, the snapshot is re-selected by primary key through the data set
    /// the write went through, and the stored columns are merged over it. After
    /// an insert whose auto-increment field is also the primary key, the
    /// generated identifier is filled in first. A generated value of an
    /// auto-increment field that is not the primary key is not merged.
    ///
    /// Returns `None` when the row is no longer found (for example after a
    /// delete).
    pub fn record(&self, refresh: bool) -> Result<Option<Record>> {
        if !refresh {
            return Ok(Some(self.context.record.clone()));
        }

        let table = self.context.table;
        let layout = table.open()?;
        let mut record = self.context.record.clone();

        if self.context.state == State::Insert {
            if let Some(index) = layout.auto_increment() {
                if table.fields()[index].primary_key {
                    let id = self.outcome.last_insert_id.ok_or_else(|| {
                        Error::query(
                            QueryErrorKind::Decode,
                            "executor did not report a generated identifier",
                        )
                    })?;
                    record.set(layout.keys()[index].clone(), Value::BigInt(id));
                }
            }
        }

        let (condition, args) = table.where_primary_key(&record)?;
        let clauses = Selector::new().filter(condition).build();
        tracing::trace!(table = %table.name(), clauses = %clauses, "Refreshing written record");
        let rows = self
            .context
            .data_set
            .select(self.context.executor, &clauses, &args)?;

        Ok(rows.into_iter().next().map(|fresh| {
            record.merge(fresh);
            record
        }))
    }
}
