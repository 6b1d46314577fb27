//! Connection management: one serialized writer, plus read-only
//! readers when the store is file-backed.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::Path;

use noteworks_core::errors::NoteworksResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The writer and, for file-backed stores, a pair of readers.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(path: &Path) -> NoteworksResult<Self> {
        Ok(Self {
            writer: WriteConnection::open(path)?,
            readers: Some(ReadPool::open(path)?),
        })
    }

    /// In-memory stores get no readers: every in-memory connection is
    /// its own isolated database, so all reads must go through the
    /// writer.
    pub fn open_in_memory() -> NoteworksResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            readers: None,
        })
    }
}
