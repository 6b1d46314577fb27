//! Migration runner properties: idempotence, monotonicity, atomicity,
//! unknown-version fail-fast.

use rusqlite::Connection;

use noteworks_core::errors::{NoteworksError, NoteworksResult, StorageError};
use noteworks_storage::migrations::{
    run_migrations, run_steps, schema_version, Migration, LATEST_VERSION, MIGRATIONS,
};
use noteworks_storage::to_storage_err;

fn fresh_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    conn
}

#[test]
fn fresh_store_reaches_latest_version() {
    let conn = fresh_conn();
    let reached = run_migrations(&conn).unwrap();
    assert_eq!(reached, LATEST_VERSION);
    assert_eq!(schema_version(&conn).unwrap(), LATEST_VERSION);

    // All three tables exist.
    for table in ["notes", "tags", "reminders"] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "missing table {table}");
    }
}

#[test]
fn rerun_on_current_store_is_noop() {
    let conn = fresh_conn();
    run_migrations(&conn).unwrap();
    let reached = run_migrations(&conn).unwrap();
    assert_eq!(reached, LATEST_VERSION);
    assert_eq!(schema_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn partial_store_resumes_from_recorded_version() {
    let conn = fresh_conn();
    // Apply only the first step, as an older binary would have.
    run_steps(&conn, &MIGRATIONS[..1]).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 1);

    let reached = run_migrations(&conn).unwrap();
    assert_eq!(reached, LATEST_VERSION);
}

#[test]
fn newer_store_is_rejected() {
    let conn = fresh_conn();
    run_migrations(&conn).unwrap();
    conn.pragma_update(None, "user_version", 99u32).unwrap();

    let err = run_migrations(&conn).unwrap_err();
    match err {
        NoteworksError::Storage(StorageError::UnknownSchemaVersion { found, latest }) => {
            assert_eq!(found, 99);
            assert_eq!(latest, LATEST_VERSION);
        }
        other => panic!("expected UnknownSchemaVersion, got {other}"),
    }
    // Version untouched.
    assert_eq!(schema_version(&conn).unwrap(), 99);
}

fn step_ok(conn: &Connection) -> NoteworksResult<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS alpha (id INTEGER PRIMARY KEY);")
        .map_err(|e| to_storage_err(e.to_string()))
}

fn step_fails_after_write(conn: &Connection) -> NoteworksResult<()> {
    // Write something, then fail: the write must be rolled back.
    conn.execute_batch("CREATE TABLE beta (id INTEGER PRIMARY KEY);")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Err(to_storage_err("injected failure".to_string()))
}

const FAILING_STEPS: &[Migration] = &[
    Migration {
        version: 1,
        name: "alpha",
        apply: step_ok,
    },
    Migration {
        version: 2,
        name: "beta-fails",
        apply: step_fails_after_write,
    },
];

#[test]
fn failed_step_leaves_version_and_data_unchanged() {
    let conn = fresh_conn();
    let err = run_steps(&conn, FAILING_STEPS).unwrap_err();
    match err {
        NoteworksError::Storage(StorageError::MigrationFailed { version, .. }) => {
            assert_eq!(version, 2);
        }
        other => panic!("expected MigrationFailed, got {other}"),
    }

    // Step 1 committed, step 2 fully rolled back.
    assert_eq!(schema_version(&conn).unwrap(), 1);
    let beta_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'beta'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(beta_count, 0, "partial step leaked past rollback");
}

#[test]
fn failed_run_can_be_retried_after_fix() {
    let conn = fresh_conn();
    let _ = run_steps(&conn, FAILING_STEPS);
    assert_eq!(schema_version(&conn).unwrap(), 1);

    // The fixed step list picks up where the failed run stopped.
    const FIXED: &[Migration] = &[
        Migration {
            version: 1,
            name: "alpha",
            apply: step_ok,
        },
        Migration {
            version: 2,
            name: "beta",
            apply: |conn| {
                conn.execute_batch("CREATE TABLE IF NOT EXISTS beta (id INTEGER PRIMARY KEY);")
                    .map_err(|e| noteworks_storage::to_storage_err(e.to_string()))
            },
        },
    ];
    assert_eq!(run_steps(&conn, FIXED).unwrap(), 2);
}

#[test]
fn migration_errors_are_not_double_wrapped() {
    fn step_reports_own_failure(_conn: &Connection) -> NoteworksResult<()> {
        Err(NoteworksError::Storage(StorageError::MigrationFailed {
            version: 1,
            reason: "column probe failed".to_string(),
        }))
    }
    const SELF_REPORTING: &[Migration] = &[Migration {
        version: 1,
        name: "self-reporting",
        apply: step_reports_own_failure,
    }];

    let conn = fresh_conn();
    let err = run_steps(&conn, SELF_REPORTING).unwrap_err();
    let message = err.to_string();
    assert_eq!(
        message.matches("migration failed at version").count(),
        1,
        "nested wrapping in: {message}"
    );
}

#[test]
fn non_contiguous_steps_are_refused() {
    let conn = fresh_conn();
    const GAPPED: &[Migration] = &[Migration {
        version: 2,
        name: "skips-one",
        apply: step_ok,
    }];

    let err = run_steps(&conn, GAPPED).unwrap_err();
    match err {
        NoteworksError::Storage(StorageError::MigrationFailed { version, .. }) => {
            assert_eq!(version, 2);
        }
        other => panic!("expected MigrationFailed, got {other}"),
    }
    assert_eq!(schema_version(&conn).unwrap(), 0);
}
