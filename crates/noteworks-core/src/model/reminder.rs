use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::note::Note;

/// A time-based reminder attached to a note.
///
/// `due_at` is fixed at creation. Only `delivered`/`delivered_at`
/// transition, exactly once, from `false`/`None` to `true`/`Some(_)`,
/// and only through the store's mark-delivered operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// UUID v4 identifier.
    pub id: String,
    /// Owning note. A reminder without a live note is invalid; the
    /// store rejects creation against a missing note and cascades
    /// deletion with the note.
    pub note_id: String,
    pub due_at: DateTime<Utc>,
    pub delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// A due reminder joined with its note, as returned by the due scan.
/// The notifier needs both: the note for display, the reminder for
/// the delivery bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueReminder {
    pub note: Note,
    pub reminder: Reminder,
}
