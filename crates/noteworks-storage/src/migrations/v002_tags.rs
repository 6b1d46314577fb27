//! v2: tags. Composite primary key, cascade with the owning note.

use rusqlite::Connection;

use noteworks_core::errors::NoteworksResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> NoteworksResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tags (
            note_id  TEXT NOT NULL,
            tag      TEXT NOT NULL,
            PRIMARY KEY (note_id, tag),
            FOREIGN KEY (note_id) REFERENCES notes(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_tags_tag ON tags(tag);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
