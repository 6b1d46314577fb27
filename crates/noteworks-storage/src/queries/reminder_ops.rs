//! Reminder lifecycle: create, cancel, due scan, mark delivered.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use noteworks_core::errors::{NoteworksError, NoteworksResult};
use noteworks_core::model::{DueReminder, Reminder};

use super::parse_dt;
use crate::to_storage_err;

/// Create a reminder against a live note. Rejected with
/// `ReferentialViolation` if the note does not exist; the FK would
/// catch it too, but the explicit probe gives a typed error instead
/// of a constraint message.
pub fn create_reminder(
    conn: &Connection,
    note_id: &str,
    due_at: DateTime<Utc>,
) -> NoteworksResult<Reminder> {
    let exists: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM notes WHERE id = ?1",
            params![note_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if exists == 0 {
        return Err(NoteworksError::ReferentialViolation {
            note_id: note_id.to_string(),
        });
    }

    let reminder = Reminder {
        id: Uuid::new_v4().to_string(),
        note_id: note_id.to_string(),
        due_at,
        delivered: false,
        delivered_at: None,
    };

    conn.execute(
        "INSERT INTO reminders (id, note_id, due_at, delivered, delivered_at)
         VALUES (?1, ?2, ?3, 0, NULL)",
        params![reminder.id, reminder.note_id, reminder.due_at.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(reminder)
}

/// Cancel a reminder by removing it entirely. Cancellation is not a
/// state transition.
pub fn cancel_reminder(conn: &Connection, id: &str) -> NoteworksResult<()> {
    let rows = conn
        .execute("DELETE FROM reminders WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(NoteworksError::ReminderNotFound { id: id.to_string() });
    }
    Ok(())
}

/// All reminders for a note, due first.
pub fn reminders_for(conn: &Connection, note_id: &str) -> NoteworksResult<Vec<Reminder>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, note_id, due_at, delivered, delivered_at
             FROM reminders WHERE note_id = ?1
             ORDER BY due_at ASC, id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let raws = stmt
        .query_map(params![note_id], row_to_raw_reminder)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raws.into_iter().map(raw_to_reminder).collect()
}

/// Undelivered reminders due at or before `now`, each joined with its
/// note. Ordered by due_at ascending, ties broken by reminder id for
/// determinism. The join guarantees no row references a missing note.
pub fn due_reminders(conn: &Connection, now: DateTime<Utc>) -> NoteworksResult<Vec<DueReminder>> {
    let mut stmt = conn
        .prepare(
            "SELECT r.id, r.note_id, r.due_at, r.delivered, r.delivered_at,
                    n.id, n.title, n.body, n.created_at, n.updated_at
             FROM reminders r
             JOIN notes n ON n.id = r.note_id
             WHERE r.delivered = 0 AND r.due_at <= ?1
             ORDER BY r.due_at ASC, r.id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let raws = stmt
        .query_map(params![now.to_rfc3339()], |row| {
            let reminder = row_to_raw_reminder(row)?;
            let note: super::note_crud::RawNote = (
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
            );
            Ok((reminder, note))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    raws.into_iter()
        .map(|(raw_reminder, raw_note)| {
            Ok(DueReminder {
                reminder: raw_to_reminder(raw_reminder)?,
                note: super::note_crud::raw_to_note(raw_note)?,
            })
        })
        .collect()
}

/// Flip `delivered` false→true and stamp `delivered_at`. The WHERE
/// guard makes the transition exactly-once: a reminder already
/// delivered (or cancelled underneath us) updates zero rows and
/// surfaces as `ReminderNotFound`.
pub fn mark_delivered(conn: &Connection, id: &str, at: DateTime<Utc>) -> NoteworksResult<()> {
    let rows = conn
        .execute(
            "UPDATE reminders SET delivered = 1, delivered_at = ?2
             WHERE id = ?1 AND delivered = 0",
            params![id, at.to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(NoteworksError::ReminderNotFound { id: id.to_string() });
    }
    Ok(())
}

/// Raw row tuple before timestamp parsing.
type RawReminder = (String, String, String, i64, Option<String>);

fn row_to_raw_reminder(row: &rusqlite::Row<'_>) -> Result<RawReminder, rusqlite::Error> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn raw_to_reminder(raw: RawReminder) -> NoteworksResult<Reminder> {
    let (id, note_id, due_at, delivered, delivered_at) = raw;
    Ok(Reminder {
        id,
        note_id,
        due_at: parse_dt(&due_at)?,
        delivered: delivered != 0,
        delivered_at: delivered_at.as_deref().map(parse_dt).transpose()?,
    })
}
