//! Tag attach/detach and tag-based listing.

use rusqlite::{params, Connection};

use noteworks_core::errors::{NoteworksError, NoteworksResult};
use noteworks_core::model::Note;

use super::note_crud::collect_notes;
use crate::to_storage_err;

/// Attach a tag to a note. Idempotent: re-adding an existing tag is a
/// no-op. The tag text is trimmed; an empty tag is rejected.
pub fn add_tag(conn: &Connection, note_id: &str, tag: &str) -> NoteworksResult<()> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(NoteworksError::InvalidInput {
            message: "tag must not be empty".to_string(),
        });
    }
    ensure_note_exists(conn, note_id)?;

    conn.execute(
        "INSERT OR IGNORE INTO tags (note_id, tag) VALUES (?1, ?2)",
        params![note_id, tag],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Detach a tag. Removing a tag the note does not carry is a no-op.
pub fn remove_tag(conn: &Connection, note_id: &str, tag: &str) -> NoteworksResult<()> {
    ensure_note_exists(conn, note_id)?;
    conn.execute(
        "DELETE FROM tags WHERE note_id = ?1 AND tag = ?2",
        params![note_id, tag.trim()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Tags carried by a note, sorted.
pub fn tags_for(conn: &Connection, note_id: &str) -> NoteworksResult<Vec<String>> {
    ensure_note_exists(conn, note_id)?;
    let mut stmt = conn
        .prepare("SELECT tag FROM tags WHERE note_id = ?1 ORDER BY tag ASC")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let tags = stmt
        .query_map(params![note_id], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| to_storage_err(e.to_string()));
    tags
}

/// Notes carrying the given tag, most recently updated first.
pub fn notes_with_tag(conn: &Connection, tag: &str) -> NoteworksResult<Vec<Note>> {
    collect_notes(
        conn,
        "SELECT n.id, n.title, n.body, n.created_at, n.updated_at
         FROM notes n
         JOIN tags t ON t.note_id = n.id
         WHERE t.tag = ?1
         ORDER BY n.updated_at DESC, n.id ASC",
        params![tag.trim()],
    )
}

fn ensure_note_exists(conn: &Connection, note_id: &str) -> NoteworksResult<()> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM notes WHERE id = ?1",
            params![note_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if count == 0 {
        return Err(NoteworksError::NoteNotFound {
            id: note_id.to_string(),
        });
    }
    Ok(())
}
