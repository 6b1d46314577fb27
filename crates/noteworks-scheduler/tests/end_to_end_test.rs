//! Whole-pipeline smoke test: migrate a fresh file store, create a
//! note with a tag and a past-due reminder, run one scheduler tick,
//! and check exactly one delivery landed.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use noteworks_core::config::SchedulerConfig;
use noteworks_core::errors::DeliveryError;
use noteworks_core::model::{NewNote, Note, Reminder};
use noteworks_core::traits::{INoteStore, Notifier, SystemClock};
use noteworks_scheduler::ReminderScheduler;
use noteworks_storage::migrations::LATEST_VERSION;
use noteworks_storage::NoteStore;

#[derive(Default)]
struct CapturingNotifier {
    delivered: Mutex<Vec<(String, String)>>,
}

impl Notifier for CapturingNotifier {
    fn deliver(&self, note: &Note, reminder: &Reminder) -> Result<(), DeliveryError> {
        self.delivered
            .lock()
            .unwrap()
            .push((note.title.clone(), reminder.id.clone()));
        Ok(())
    }
}

#[test]
fn fresh_store_to_delivered_reminder() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("noteworks.db");

    let store = Arc::new(NoteStore::open(&db_path).unwrap());
    assert_eq!(store.schema_version().unwrap(), LATEST_VERSION);

    let note = store
        .create_note(NewNote {
            title: "Groceries".to_string(),
            body: "milk, eggs".to_string(),
        })
        .unwrap();
    store.add_tag(&note.id, "home").unwrap();
    let reminder = store
        .create_reminder(&note.id, Utc::now() - Duration::minutes(1))
        .unwrap();

    let notifier = Arc::new(CapturingNotifier::default());
    let scheduler = ReminderScheduler::new(
        store.clone(),
        notifier.clone(),
        Arc::new(SystemClock),
        SchedulerConfig::default(),
    );

    let cancel = CancellationToken::new();
    assert_eq!(scheduler.tick(&cancel), 1);

    let delivered = notifier.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0], ("Groceries".to_string(), reminder.id.clone()));

    let after = &store.reminders_for(&note.id).unwrap()[0];
    assert!(after.delivered);
    assert!(after.delivered_at.is_some());
    assert_eq!(store.tags_for(&note.id).unwrap(), vec!["home"]);

    // A second tick has nothing left to do.
    assert_eq!(scheduler.tick(&cancel), 0);
}
