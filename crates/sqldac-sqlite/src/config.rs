//! SQLite connection configuration.
//!
//! Provides the file location and the pragmas applied when a connection is
//! opened.

use std::path::PathBuf;
use std::time::Duration;

/// Journal mode set with `PRAGMA journal_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JournalMode {
    /// Leave the database's current mode untouched
    #[default]
    Unchanged,
    /// Rollback journal deleted at the end of each transaction
    Delete,
    /// Rollback journal truncated instead of deleted
    Truncate,
    /// Write-ahead log
    Wal,
    /// Journal kept in memory
    Memory,
    /// No journal at all
    Off,
}

impl JournalMode {
    /// Pragma value, or `None` for [`JournalMode::Unchanged`].
    pub const fn as_pragma(self) -> Option<&'static str> {
        match self {
            JournalMode::Unchanged => None,
            JournalMode::Delete => Some("DELETE"),
            JournalMode::Truncate => Some("TRUNCATE"),
            JournalMode::Wal => Some("WAL"),
            JournalMode::Memory => Some("MEMORY"),
            JournalMode::Off => Some("OFF"),
        }
    }
}

/// SQLite connection configuration.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file; `None` opens a private in-memory database
    pub path: Option<PathBuf>,
    /// Open the file read-only
    pub read_only: bool,
    /// Create the file when it does not exist (ignored when read-only)
    pub create: bool,
    /// How long to retry when the database is locked (default: 5s)
    pub busy_timeout: Duration,
    /// Enforce foreign-key constraints (default: on)
    pub foreign_keys: bool,
    /// Journal mode
    pub journal_mode: JournalMode,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: None,
            read_only: false,
            create: true,
            busy_timeout: Duration::from_secs(5),
            foreign_keys: true,
            journal_mode: JournalMode::default(),
        }
    }
}

impl SqliteConfig {
    /// Configuration for a private in-memory database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for a database file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::default().path(path)
    }

    /// Set the database file.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Open read-only.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Create the file if missing.
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Set the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Enable or disable foreign-key enforcement.
    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Set the journal mode.
    pub fn journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = mode;
        self
    }

    /// True when no file is configured.
    pub fn is_memory(&self) -> bool {
        self.path.is_none()
    }

    /// Flags passed to `sqlite3_open_v2`.
    pub(crate) fn open_flags(&self) -> rusqlite::OpenFlags {
        use rusqlite::OpenFlags;

        let mut flags = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if self.read_only {
            flags |= OpenFlags::SQLITE_OPEN_READ_ONLY;
        } else {
            flags |= OpenFlags::SQLITE_OPEN_READ_WRITE;
            if self.create {
                flags |= OpenFlags::SQLITE_OPEN_CREATE;
            }
        }
        flags
    }
}
