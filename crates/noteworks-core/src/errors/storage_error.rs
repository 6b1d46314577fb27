/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error(
        "store schema version {found} is newer than this build supports (latest known: {latest}); \
         refusing to downgrade"
    )]
    UnknownSchemaVersion { found: u32, latest: u32 },
}
