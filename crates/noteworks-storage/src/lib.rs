//! # noteworks-storage
//!
//! SQLite persistence for notes, tags, and reminders: a serialized
//! write connection plus a small read pool, versioned schema
//! migrations driven by `PRAGMA user_version`, and a [`NoteStore`]
//! facade implementing the core store trait.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::NoteStore;

use noteworks_core::errors::{NoteworksError, StorageError};

/// Map a raw SQLite failure into the storage error family.
pub fn to_storage_err(message: String) -> NoteworksError {
    NoteworksError::Storage(StorageError::SqliteError { message })
}
