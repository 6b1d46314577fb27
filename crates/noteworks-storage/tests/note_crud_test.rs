//! Note CRUD lifecycle against an in-memory store.

use noteworks_core::errors::NoteworksError;
use noteworks_core::model::{NewNote, NoteUpdate};
use noteworks_core::traits::INoteStore;
use noteworks_storage::NoteStore;

fn new_note(title: &str) -> NewNote {
    NewNote {
        title: title.to_string(),
        body: format!("body of {title}"),
    }
}

#[test]
fn create_and_get() {
    let store = NoteStore::open_in_memory().unwrap();
    let note = store.create_note(new_note("Groceries")).unwrap();

    let retrieved = store.get_note(&note.id).unwrap().expect("note should exist");
    assert_eq!(retrieved, note);
    assert_eq!(retrieved.created_at, retrieved.updated_at);
}

#[test]
fn get_nonexistent_returns_none() {
    let store = NoteStore::open_in_memory().unwrap();
    assert!(store.get_note("does-not-exist").unwrap().is_none());
}

#[test]
fn list_orders_by_updated_at_desc() {
    let store = NoteStore::open_in_memory().unwrap();
    let first = store.create_note(new_note("first")).unwrap();
    let second = store.create_note(new_note("second")).unwrap();

    // Touch the first note so it becomes the most recently updated.
    std::thread::sleep(std::time::Duration::from_millis(5));
    store
        .update_note(
            &first.id,
            NoteUpdate {
                body: Some("touched".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let listed = store.list_notes().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);
}

#[test]
fn update_bumps_updated_at_only() {
    let store = NoteStore::open_in_memory().unwrap();
    let note = store.create_note(new_note("stable")).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let updated = store
        .update_note(
            &note.id,
            NoteUpdate {
                title: Some("renamed".to_string()),
                body: None,
            },
        )
        .unwrap();

    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.body, note.body, "unset field must be untouched");
    assert_eq!(updated.created_at, note.created_at);
    assert!(updated.updated_at > note.updated_at);
}

#[test]
fn update_missing_note_fails() {
    let store = NoteStore::open_in_memory().unwrap();
    let err = store
        .update_note("ghost", NoteUpdate::default())
        .unwrap_err();
    assert!(matches!(err, NoteworksError::NoteNotFound { .. }));
}

#[test]
fn delete_removes_note() {
    let store = NoteStore::open_in_memory().unwrap();
    let note = store.create_note(new_note("doomed")).unwrap();

    store.delete_note(&note.id).unwrap();
    assert!(store.get_note(&note.id).unwrap().is_none());

    let err = store.delete_note(&note.id).unwrap_err();
    assert!(matches!(err, NoteworksError::NoteNotFound { .. }));
}

#[test]
fn search_is_case_insensitive_over_title_and_body() {
    let store = NoteStore::open_in_memory().unwrap();
    store.create_note(new_note("Groceries")).unwrap();
    store
        .create_note(NewNote {
            title: "errands".to_string(),
            body: "buy GROCERIES on the way home".to_string(),
        })
        .unwrap();
    store.create_note(new_note("unrelated")).unwrap();

    let hits = store.search_notes("groceries").unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn search_treats_like_metacharacters_literally() {
    let store = NoteStore::open_in_memory().unwrap();
    store
        .create_note(NewNote {
            title: "progress 50%".to_string(),
            body: String::new(),
        })
        .unwrap();
    store
        .create_note(NewNote {
            title: "progress 500".to_string(),
            body: String::new(),
        })
        .unwrap();

    let hits = store.search_notes("50%").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "progress 50%");
}
