//! Per-operation database connections
//!
//! Every caller-facing operation opens a fresh read-only connection through
//! [`ConnectionScope::open`]. The scope owns the connection and closes it on
//! drop, so it is released on success, on rejection and on mid-fetch errors
//! alike. Nothing is pooled or reused across calls.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::types::{ExplorerError, Result};

/// Location of the database file, fixed for the life of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabasePath(PathBuf);

impl DatabasePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Fail with `DatabaseMissing` unless the file exists right now
    pub fn ensure_exists(&self) -> Result<()> {
        if self.0.is_file() {
            Ok(())
        } else {
            Err(ExplorerError::DatabaseMissing {
                path: self.0.clone(),
            })
        }
    }
}

impl std::fmt::Display for DatabasePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A connection held for the duration of one operation
#[derive(Debug)]
pub struct ConnectionScope {
    conn: Connection,
}

impl ConnectionScope {
    /// Open `path` read-only; the file is never created
    pub fn open(path: &DatabasePath) -> Result<Self> {
        path.ensure_exists()?;

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path.as_path(), flags)?;

        tracing::trace!(database = %path, "Acquired connection");
        Ok(Self { conn })
    }
}

impl Deref for ConnectionScope {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for ConnectionScope {
    fn drop(&mut self) {
        tracing::trace!("Released connection");
    }
}
