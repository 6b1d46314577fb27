//! v3: reminders. The due-scan index covers the scheduler's poll
//! query (undelivered, due_at ascending).

use rusqlite::Connection;

use noteworks_core::errors::NoteworksResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> NoteworksResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reminders (
            id            TEXT PRIMARY KEY,
            note_id       TEXT NOT NULL,
            due_at        TEXT NOT NULL,
            delivered     INTEGER NOT NULL DEFAULT 0,
            delivered_at  TEXT,
            FOREIGN KEY (note_id) REFERENCES notes(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_reminders_due ON reminders(delivered, due_at);
        CREATE INDEX IF NOT EXISTS idx_reminders_note ON reminders(note_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
