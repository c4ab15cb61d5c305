//! SQLite connection implementing [`Executor`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;

use sqldac_core::{ExecResult, Executor, Result, Row, Value};

use crate::config::SqliteConfig;
use crate::error::query_error;
use crate::value::{Param, from_sql};

/// A single SQLite connection.
///
/// Statements run one at a time behind a mutex, so the connection can be shared
/// across threads. Transactions are the caller's business: issue `BEGIN` and
/// `COMMIT` (for example through [`execute_batch`](Self::execute_batch)) around
/// the writes that belong together.
#[derive(Debug)]
pub struct SqliteConnection {
    inner: Mutex<Connection>,
    config: SqliteConfig,
}

impl SqliteConnection {
    /// Open a connection and apply the configured pragmas.
    #[tracing::instrument(level = "debug", skip(config), fields(path = ?config.path))]
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        let flags = config.open_flags();
        let conn = match &config.path {
            Some(path) => Connection::open_with_flags(path, flags),
            None => Connection::open_in_memory_with_flags(flags),
        }
        .map_err(|e| query_error(e, None))?;

        conn.busy_timeout(config.busy_timeout)
            .map_err(|e| query_error(e, None))?;
        conn.pragma_update(None, "foreign_keys", config.foreign_keys)
            .map_err(|e| query_error(e, Some("PRAGMA foreign_keys")))?;
        if let Some(mode) = config.journal_mode.as_pragma() {
            conn.pragma_update_and_check(None, "journal_mode", mode, |_| Ok(()))
                .map_err(|e| query_error(e, Some("PRAGMA journal_mode")))?;
        }

        tracing::info!(memory = config.is_memory(), "Opened SQLite connection");
        Ok(Self {
            inner: Mutex::new(conn),
            config: config.clone(),
        })
    }

    /// Open a private in-memory database with default settings.
    pub fn open_memory() -> Result<Self> {
        Self::open(&SqliteConfig::new())
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Run one or more `;`-separated statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        tracing::debug!(sql = %sql, "Executing batch");
        self.lock()
            .execute_batch(sql)
            .map_err(|e| query_error(e, Some(sql)))
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Executor for SqliteConnection {
    #[tracing::instrument(level = "trace", skip(self, params))]
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(sql).map_err(|e| query_error(e, Some(sql)))?;
        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter().map(Param)))
            .map_err(|e| query_error(e, Some(sql)))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| query_error(e, Some(sql)))? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                let value = row.get_ref(i).map_err(|e| query_error(e, Some(sql)))?;
                values.push(from_sql(value)?);
            }
            out.push(Row::new(Arc::clone(&columns), values));
        }

        tracing::debug!(rows = out.len(), "Query returned rows");
        Ok(out)
    }

    #[tracing::instrument(level = "trace", skip(self, params))]
    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult> {
        let conn = self.lock();
        let changed = conn
            .execute(sql, rusqlite::params_from_iter(params.iter().map(Param)))
            .map_err(|e| query_error(e, Some(sql)))?;

        let is_insert = sql
            .trim_start()
            .get(..6)
            .is_some_and(|head| head.eq_ignore_ascii_case("INSERT"));
        let last_insert_id = (is_insert && changed > 0).then(|| conn.last_insert_rowid());

        tracing::debug!(rows_affected = changed, last_insert_id = ?last_insert_id, "Statement executed");
        Ok(ExecResult::new(changed as u64, last_insert_id))
    }
}
