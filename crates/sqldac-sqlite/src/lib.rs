//! SQLite executor for sqldac.
//!
//! Wraps a `rusqlite` connection behind the [`Executor`](sqldac_core::Executor)
//! contract: `?` placeholders are bound positionally, integers come back as
//! `BigInt`, and constraint, busy and syntax failures are classified into
//! [`QueryErrorKind`](sqldac_core::QueryErrorKind).
//!
//! ```
//! use sqldac_core::{Executor, Value};
//! use sqldac_sqlite::{SqliteConfig, SqliteConnection};
//!
//! let db = SqliteConnection::open(&SqliteConfig::new().foreign_keys(true))?;
//! db.execute_batch("CREATE TABLE tags (id INTEGER PRIMARY KEY, label TEXT)")?;
//! let outcome = db.execute("INSERT INTO tags(label) VALUES(?)", &[Value::from("rust")])?;
//! assert_eq!(outcome.last_insert_id, Some(1));
//! # Ok::<(), sqldac_core::Error>(())
//! ```

pub mod config;
pub mod connection;
mod error;
mod value;

pub use config::{JournalMode, SqliteConfig};
pub use connection::SqliteConnection;
