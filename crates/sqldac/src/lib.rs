//! Table-centric data access over plain SQL.
//!
//! `sqldac` is the **facade crate**. A [`Table`] is declared at runtime as an
//! ordered list of [`Field`]s; records are untyped [`Record`] maps keyed by each
//! field's record key. The table builds parameterized INSERT, UPDATE, DELETE,
//! SELECT and COUNT statements, resolves defaults and on-update values,
//! validates every value before anything is executed, and hands the SQL to a
//! caller-supplied [`Executor`].
//!
//! # Role In The Architecture
//!
//! - **Schema**: [`Field`] and [`Table`] describe columns, keys, defaults and
//!   validation; [`TableLayout`] is the state derived from them on open.
//! - **Writes**: [`Table::insert`], [`Table::update`] and [`Table::delete`] go
//!   through an optional [`WriteHook`] that may delegate back to the default
//!   handlers, and return a [`WriteResult`].
//! - **Reads**: [`Table::select`], the COUNT family, and pre-filtered [`View`]s,
//!   all behind the [`DataSet`] capability.
//! - **Validation**: [`Rule`] and [`ContextRule`] implementations, with stock
//!   rules in [`rules`].
//!
//! Connections and transactions are the caller's: anything implementing
//! [`Executor`] works, such as `sqldac_sqlite::SqliteConnection`.
//!
//! # Example
//!
//! ```
//! use sqldac::prelude::*;
//! use sqldac::rules::Required;
//! use sqldac_sqlite::SqliteConnection;
//!
//! let db = SqliteConnection::open_memory()?;
//! db.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, score INTEGER)")?;
//!
//! let users = Table::new("users")
//!     .field(Field::new("id").primary_key().auto_increment())
//!     .field(Field::new("name").validate(Required))
//!     .field(Field::new("score").default_value(0_i64));
//!
//! let created = users
//!     .insert(&db, &Record::from([("name", "ada")]))?
//!     .record(true)?
//!     .expect("row was just inserted");
//! assert_eq!(created.get("id"), Some(&Value::BigInt(1)));
//! assert_eq!(created.get("score"), Some(&Value::BigInt(0)));
//! # Ok::<(), sqldac::Error>(())
//! ```

mod context;
mod count;
mod dataset;
mod field;
mod result;
pub mod rules;
mod table;
mod validation;
mod write;

#[cfg(test)]
mod testing;

pub use context::{Context, State};
pub use dataset::{DataSet, View};
pub use field::{Field, Provider};
pub use result::WriteResult;
pub use table::{Table, TableLayout, WriteHook};
pub use validation::{ContextRule, Rule, RuleError, Validation};

pub use sqldac_core::{
    ConfigError, Error, ExecResult, Executor, FieldValidationError, MissingValueError,
    QueryError, QueryErrorKind, Record, Result, Row, SqlType, ValidationError,
    ValidationErrorKind, Value,
};
pub use sqldac_query::{Order, Selector};

/// Everything needed to declare tables and run writes.
pub mod prelude {
    pub use crate::{
        Context, DataSet, Error, ExecResult, Executor, Field, Order, Record, Result, Selector,
        SqlType, State, Table, Value, View, WriteResult,
    };
}
