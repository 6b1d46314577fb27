//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 5s busy_timeout, foreign_keys ON. Foreign
//! keys carry the tag/reminder cascade, so every connection must have
//! them on; SQLite defaults them off per connection.

use rusqlite::Connection;

use noteworks_core::errors::NoteworksResult;

use crate::to_storage_err;

/// Apply write-connection pragmas.
pub fn apply_pragmas(conn: &Connection) -> NoteworksResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Apply read-connection pragmas. Same set minus journal_mode, which
/// a read-only connection cannot change.
pub fn apply_read_pragmas(conn: &Connection) -> NoteworksResult<()> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
