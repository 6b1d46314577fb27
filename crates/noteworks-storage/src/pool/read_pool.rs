//! Read-only connections for file-backed stores.
//!
//! Under WAL the writer never blocks readers, so foreground queries
//! and the scheduler's due scan can overlap a write. Two readers
//! cover this store's whole concurrency story: one CLI command plus
//! one background poll.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use noteworks_core::errors::NoteworksResult;

use super::pragmas::apply_read_pragmas;
use crate::to_storage_err;

/// One read-only connection per concurrent reader.
const READER_COUNT: usize = 2;

/// A fixed pair of read-only connections handed out in rotation.
pub struct ReadPool {
    readers: [Mutex<Connection>; READER_COUNT],
    next: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &Path) -> NoteworksResult<Self> {
        let open_reader = || -> NoteworksResult<Mutex<Connection>> {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            apply_read_pragmas(&conn)?;
            Ok(Mutex::new(conn))
        };
        Ok(Self {
            readers: [open_reader()?, open_reader()?],
            next: AtomicUsize::new(0),
        })
    }

    /// Run a query on the next reader in rotation.
    pub fn read<F, T>(&self, f: F) -> NoteworksResult<T>
    where
        F: FnOnce(&Connection) -> NoteworksResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % READER_COUNT;
        let guard = self.readers[idx]
            .lock()
            .map_err(|e| to_storage_err(format!("reader mutex poisoned: {e}")))?;
        f(&guard)
    }
}
