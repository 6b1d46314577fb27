//! Versioned schema migrations driven by `PRAGMA user_version`.
//!
//! Migrations are a static, author-maintained ordered list. Each step
//! advances the schema by exactly one version and runs in a single
//! transaction together with the version bump, so a crash mid-step
//! leaves the store at the pre-step version. Step bodies are
//! idempotent at the statement level (`IF NOT EXISTS`, column probes);
//! the runner itself only orders and guards.

mod v001_notes;
mod v002_tags;
mod v003_reminders;

use rusqlite::Connection;

use noteworks_core::errors::{NoteworksError, NoteworksResult, StorageError};

use crate::to_storage_err;

/// A single schema upgrade step.
pub struct Migration {
    /// The version this step upgrades TO. Must be exactly one greater
    /// than the store's version when the step runs.
    pub version: u32,
    pub name: &'static str,
    pub apply: fn(&Connection) -> NoteworksResult<()>,
}

/// The ordered upgrade path. Versions must be contiguous from 1.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "notes",
        apply: v001_notes::migrate,
    },
    Migration {
        version: 2,
        name: "tags",
        apply: v002_tags::migrate,
    },
    Migration {
        version: 3,
        name: "reminders",
        apply: v003_reminders::migrate,
    },
];

/// Highest version this build knows how to reach.
pub const LATEST_VERSION: u32 = MIGRATIONS[MIGRATIONS.len() - 1].version;

/// Upgrade the store to the latest known version. Returns the final
/// version reached. A store already at the latest version is a no-op.
/// A store at a version newer than this build fails fast — downgrade
/// is unsupported.
pub fn run_migrations(conn: &Connection) -> NoteworksResult<u32> {
    run_steps(conn, MIGRATIONS)
}

/// Runner over an explicit step list. Public so tests can inject
/// failing or truncated lists; production callers use
/// [`run_migrations`].
pub fn run_steps(conn: &Connection, steps: &[Migration]) -> NoteworksResult<u32> {
    let mut current = schema_version(conn)?;
    let latest = steps.last().map_or(current, |s| s.version);

    if current > latest {
        return Err(NoteworksError::Storage(StorageError::UnknownSchemaVersion {
            found: current,
            latest,
        }));
    }

    let start = current;
    for step in steps.iter().filter(|s| s.version > start) {
        if step.version != current + 1 {
            return Err(NoteworksError::Storage(StorageError::MigrationFailed {
                version: step.version,
                reason: format!("non-contiguous step: store is at {current}"),
            }));
        }
        apply_step(conn, step)?;
        current = step.version;
        tracing::info!(version = step.version, name = step.name, "applied migration");
    }

    Ok(current)
}

/// Read the store's recorded schema version (0 for a brand-new store).
pub fn schema_version(conn: &Connection) -> NoteworksResult<u32> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(version as u32)
}

/// Run one step and the version bump in a single transaction.
fn apply_step(conn: &Connection, step: &Migration) -> NoteworksResult<()> {
    let migration_err = |reason: String| {
        NoteworksError::Storage(StorageError::MigrationFailed {
            version: step.version,
            reason,
        })
    };

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| migration_err(format!("begin: {e}")))?;

    let result = (step.apply)(&tx).and_then(|()| {
        tx.pragma_update(None, "user_version", step.version)
            .map_err(|e| migration_err(format!("set user_version: {e}")))
    });

    match result {
        Ok(()) => tx
            .commit()
            .map_err(|e| migration_err(format!("commit: {e}"))),
        Err(e) => {
            let _ = tx.rollback();
            // Step failures that already carry a version are passed
            // through; only raw errors get wrapped.
            match e {
                NoteworksError::Storage(StorageError::MigrationFailed { .. }) => Err(e),
                other => Err(migration_err(other.to_string())),
            }
        }
    }
}
