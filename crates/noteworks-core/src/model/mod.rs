//! Persistent entities: notes, tags, reminders.
//!
//! Tags have no struct of their own: a tag is a `(note_id, text)` row
//! owned by its note, surfaced as plain `String`s by the store.

mod note;
mod reminder;

pub use note::{NewNote, Note, NoteUpdate};
pub use reminder::{DueReminder, Reminder};
