//! Create, get, list, update, delete, search for notes.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use noteworks_core::errors::{NoteworksError, NoteworksResult};
use noteworks_core::model::{NewNote, Note, NoteUpdate};

use super::parse_dt;
use crate::to_storage_err;

/// Insert a new note, assigning id and timestamps.
pub fn create_note(conn: &Connection, new: NewNote) -> NoteworksResult<Note> {
    let now = Utc::now();
    let note = Note {
        id: Uuid::new_v4().to_string(),
        title: new.title,
        body: new.body,
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO notes (id, title, body, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            note.id,
            note.title,
            note.body,
            note.created_at.to_rfc3339(),
            note.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(note)
}

/// Get a single note by id.
pub fn get_note(conn: &Connection, id: &str) -> NoteworksResult<Option<Note>> {
    let mut stmt = conn
        .prepare("SELECT id, title, body, created_at, updated_at FROM notes WHERE id = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let row = stmt
        .query_row(params![id], row_to_raw)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    row.map(raw_to_note).transpose()
}

/// All notes, most recently updated first.
pub fn list_notes(conn: &Connection) -> NoteworksResult<Vec<Note>> {
    collect_notes(
        conn,
        "SELECT id, title, body, created_at, updated_at FROM notes
         ORDER BY updated_at DESC, id ASC",
        params![],
    )
}

/// Apply a partial update, bumping `updated_at`. `created_at` never
/// changes.
pub fn update_note(conn: &Connection, id: &str, update: NoteUpdate) -> NoteworksResult<Note> {
    let Some(mut note) = get_note(conn, id)? else {
        return Err(NoteworksError::NoteNotFound { id: id.to_string() });
    };

    if let Some(title) = update.title {
        note.title = title;
    }
    if let Some(body) = update.body {
        note.body = body;
    }
    note.updated_at = Utc::now();

    let rows = conn
        .execute(
            "UPDATE notes SET title = ?2, body = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                note.id,
                note.title,
                note.body,
                note.updated_at.to_rfc3339()
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(NoteworksError::NoteNotFound { id: id.to_string() });
    }
    Ok(note)
}

/// Delete a note. Foreign keys cascade the tags and reminders in the
/// same statement.
pub fn delete_note(conn: &Connection, id: &str) -> NoteworksResult<()> {
    let rows = conn
        .execute("DELETE FROM notes WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(NoteworksError::NoteNotFound { id: id.to_string() });
    }
    Ok(())
}

/// Case-insensitive substring search over title and body.
pub fn search_notes(conn: &Connection, query: &str) -> NoteworksResult<Vec<Note>> {
    let pattern = format!("%{}%", escape_like(query));
    collect_notes(
        conn,
        "SELECT id, title, body, created_at, updated_at FROM notes
         WHERE title LIKE ?1 ESCAPE '\\' OR body LIKE ?1 ESCAPE '\\'
         ORDER BY updated_at DESC, id ASC",
        params![pattern],
    )
}

/// Escape LIKE metacharacters in user input.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

pub(crate) fn collect_notes(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> NoteworksResult<Vec<Note>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, row_to_raw)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().map(raw_to_note).collect()
}

/// Raw row tuple before timestamp parsing.
pub(crate) type RawNote = (String, String, String, String, String);

pub(crate) fn row_to_raw(row: &rusqlite::Row<'_>) -> Result<RawNote, rusqlite::Error> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

pub(crate) fn raw_to_note(raw: RawNote) -> NoteworksResult<Note> {
    let (id, title, body, created_at, updated_at) = raw;
    Ok(Note {
        id,
        title,
        body,
        created_at: parse_dt(&created_at)?,
        updated_at: parse_dt(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like("plain"), "plain");
    }
}
