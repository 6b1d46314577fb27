//! NoteStore — owns the ConnectionPool, implements INoteStore,
//! runs migrations at open.

use std::path::Path;

use chrono::{DateTime, Utc};

use noteworks_core::errors::NoteworksResult;
use noteworks_core::model::{DueReminder, NewNote, Note, NoteUpdate, Reminder};
use noteworks_core::traits::INoteStore;

use crate::migrations;
use crate::pool::ConnectionPool;

/// The on-disk store. Opening brings the schema to the current
/// version; a migration failure propagates out and the store is never
/// handed to callers in a partially-upgraded state.
pub struct NoteStore {
    pool: ConnectionPool,
}

impl NoteStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> NoteworksResult<Self> {
        let store = Self {
            pool: ConnectionPool::open(path)?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> NoteworksResult<Self> {
        let store = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Bring the schema to the current version.
    fn initialize(&self) -> NoteworksResult<()> {
        let version = self
            .pool
            .writer
            .with_conn_sync(migrations::run_migrations)?;
        tracing::debug!(version, "store opened");
        Ok(())
    }

    /// Execute a read-only query on the best available connection:
    /// a pooled reader when file-backed, the writer otherwise.
    fn with_reader<F, T>(&self, f: F) -> NoteworksResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> NoteworksResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.read(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }
}

impl INoteStore for NoteStore {
    fn create_note(&self, new: NewNote) -> NoteworksResult<Note> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::note_crud::create_note(conn, new))
    }

    fn get_note(&self, id: &str) -> NoteworksResult<Option<Note>> {
        self.with_reader(|conn| crate::queries::note_crud::get_note(conn, id))
    }

    fn list_notes(&self) -> NoteworksResult<Vec<Note>> {
        self.with_reader(crate::queries::note_crud::list_notes)
    }

    fn update_note(&self, id: &str, update: NoteUpdate) -> NoteworksResult<Note> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::note_crud::update_note(conn, id, update))
    }

    fn delete_note(&self, id: &str) -> NoteworksResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::note_crud::delete_note(conn, id))
    }

    fn search_notes(&self, query: &str) -> NoteworksResult<Vec<Note>> {
        self.with_reader(|conn| crate::queries::note_crud::search_notes(conn, query))
    }

    fn add_tag(&self, note_id: &str, tag: &str) -> NoteworksResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::tag_ops::add_tag(conn, note_id, tag))
    }

    fn remove_tag(&self, note_id: &str, tag: &str) -> NoteworksResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::tag_ops::remove_tag(conn, note_id, tag))
    }

    fn tags_for(&self, note_id: &str) -> NoteworksResult<Vec<String>> {
        self.with_reader(|conn| crate::queries::tag_ops::tags_for(conn, note_id))
    }

    fn notes_with_tag(&self, tag: &str) -> NoteworksResult<Vec<Note>> {
        self.with_reader(|conn| crate::queries::tag_ops::notes_with_tag(conn, tag))
    }

    fn create_reminder(&self, note_id: &str, due_at: DateTime<Utc>) -> NoteworksResult<Reminder> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::reminder_ops::create_reminder(conn, note_id, due_at)
        })
    }

    fn cancel_reminder(&self, id: &str) -> NoteworksResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::reminder_ops::cancel_reminder(conn, id))
    }

    fn reminders_for(&self, note_id: &str) -> NoteworksResult<Vec<Reminder>> {
        self.with_reader(|conn| crate::queries::reminder_ops::reminders_for(conn, note_id))
    }

    fn due_reminders(&self, now: DateTime<Utc>) -> NoteworksResult<Vec<DueReminder>> {
        self.with_reader(|conn| crate::queries::reminder_ops::due_reminders(conn, now))
    }

    fn mark_delivered(&self, id: &str, at: DateTime<Utc>) -> NoteworksResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::reminder_ops::mark_delivered(conn, id, at))
    }

    fn schema_version(&self) -> NoteworksResult<u32> {
        self.pool.writer.with_conn_sync(migrations::schema_version)
    }
}
