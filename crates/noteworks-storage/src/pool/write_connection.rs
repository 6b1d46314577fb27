//! The single serialized write connection.
//!
//! All mutations funnel through one mutex-guarded connection so
//! conflicting writes from the foreground command path and the
//! background scheduler serialize at this seam.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use noteworks_core::errors::NoteworksResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Mutex-guarded write connection.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> NoteworksResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> NoteworksResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with the write connection. Held only for the
    /// duration of the closure; no suspension points inside.
    pub fn with_conn_sync<F, T>(&self, f: F) -> NoteworksResult<T>
    where
        F: FnOnce(&Connection) -> NoteworksResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        f(&guard)
    }
}
