use chrono::{DateTime, Utc};

use crate::errors::NoteworksResult;
use crate::model::{DueReminder, NewNote, Note, NoteUpdate, Reminder};

/// The full store contract: notes, tags, reminders, schema version.
///
/// Implementations serialize conflicting writes; each logical
/// operation runs in its own short transaction and never holds a lock
/// across a notifier call. Passed as an explicit handle rather than a
/// process-wide singleton, so tests can run multiple stores.
pub trait INoteStore: Send + Sync {
    // --- Notes ---
    fn create_note(&self, new: NewNote) -> NoteworksResult<Note>;
    fn get_note(&self, id: &str) -> NoteworksResult<Option<Note>>;
    /// All notes, most recently updated first.
    fn list_notes(&self) -> NoteworksResult<Vec<Note>>;
    fn update_note(&self, id: &str, update: NoteUpdate) -> NoteworksResult<Note>;
    /// Deletes the note and cascades to its tags and reminders.
    fn delete_note(&self, id: &str) -> NoteworksResult<()>;
    /// Case-insensitive substring match over title and body.
    fn search_notes(&self, query: &str) -> NoteworksResult<Vec<Note>>;

    // --- Tags ---
    fn add_tag(&self, note_id: &str, tag: &str) -> NoteworksResult<()>;
    fn remove_tag(&self, note_id: &str, tag: &str) -> NoteworksResult<()>;
    fn tags_for(&self, note_id: &str) -> NoteworksResult<Vec<String>>;
    fn notes_with_tag(&self, tag: &str) -> NoteworksResult<Vec<Note>>;

    // --- Reminders ---
    /// Rejects with `ReferentialViolation` if the note does not exist.
    fn create_reminder(&self, note_id: &str, due_at: DateTime<Utc>) -> NoteworksResult<Reminder>;
    /// Removes the reminder entirely; cancellation is not a state.
    fn cancel_reminder(&self, id: &str) -> NoteworksResult<()>;
    fn reminders_for(&self, note_id: &str) -> NoteworksResult<Vec<Reminder>>;
    /// Undelivered reminders with `due_at <= now`, ordered by due_at
    /// ascending then id ascending, each joined with its note.
    fn due_reminders(&self, now: DateTime<Utc>) -> NoteworksResult<Vec<DueReminder>>;
    /// Flips `delivered` false→true and stamps `delivered_at`, in a
    /// transaction scoped to that single reminder. Errors if the
    /// reminder is gone or already delivered.
    fn mark_delivered(&self, id: &str, at: DateTime<Utc>) -> NoteworksResult<()>;

    // --- Diagnostics ---
    fn schema_version(&self) -> NoteworksResult<u32>;
}
