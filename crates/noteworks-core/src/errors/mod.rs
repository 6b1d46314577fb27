//! Unified error taxonomy.
//!
//! Startup migration failures are fatal; everything else is contained
//! and retried by the caller that observes it.

mod scheduler_error;
mod storage_error;

pub use scheduler_error::DeliveryError;
pub use storage_error::StorageError;

/// Top-level error type. Storage errors wrap transparently; domain
/// rejections (missing note, dangling reminder) get their own variants
/// so callers can match on them at the store boundary.
#[derive(Debug, thiserror::Error)]
pub enum NoteworksError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("note not found: {id}")]
    NoteNotFound { id: String },

    #[error("reminder not found: {id}")]
    ReminderNotFound { id: String },

    #[error("reminder references nonexistent note: {note_id}")]
    ReferentialViolation { note_id: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

pub type NoteworksResult<T> = Result<T, NoteworksError>;
