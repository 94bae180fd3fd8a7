use notestore_core::{Note, NoteStore, StoreError, NOTE_ID_LEN};
use std::collections::HashSet;

#[test]
fn add_note_appends_in_order_with_equal_timestamps() {
    let mut store = NoteStore::new();

    let first = store.add_note("first", "one");
    let second = store.add_note("second", "two");

    assert_eq!(store.len(), 2);
    assert_eq!(store.notes()[0], first);
    assert_eq!(store.notes()[1], second);
    for note in store.iter() {
        assert_eq!(note.id.len(), NOTE_ID_LEN);
        assert_eq!(note.date_created, 0);
        assert_eq!(note.last_modified, note.date_created);
    }
}

#[test]
fn added_ids_are_present_exactly_once() {
    let mut store = NoteStore::new();
    let ids: Vec<String> = (0..500)
        .map(|idx| store.add_note(format!("title {idx}"), "body").id)
        .collect();

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    for id in &ids {
        assert_eq!(store.iter().filter(|note| &note.id == id).count(), 1);
    }
}

#[test]
fn update_note_replaces_content_and_bumps_last_modified() {
    let mut store = NoteStore::new();
    let created = store.add_note("draft", "body");
    store.add_note("other", "untouched");

    let updated = store.update_note(&created.id, "final", "new body").unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "final");
    assert_eq!(updated.body, "new body");
    assert_eq!(updated.date_created, created.date_created);
    assert_eq!(updated.last_modified, created.last_modified + 1);
    assert_eq!(store.notes()[0], updated);
    assert_eq!(store.notes()[1].title, "other");

    let again = store.update_note(&created.id, "final", "new body").unwrap();
    assert_eq!(again.last_modified, created.last_modified + 2);
}

#[test]
fn update_note_matches_ids_case_sensitively() {
    let mut store = NoteStore::from_notes(vec![Note::new("abc", "Hi", "World", 0)]).unwrap();

    let err = store.update_note("ABC", "x", "y").unwrap_err();
    assert_eq!(err, StoreError::NotFound("ABC".to_string()));
    assert_eq!(store.get("abc").unwrap().title, "Hi");
}

#[test]
fn update_missing_note_leaves_store_unchanged() {
    let mut store = NoteStore::new();
    store.add_note("a", "b");
    store.add_note("c", "d");
    let before = serde_json::to_vec(store.notes()).unwrap();

    let err = store.update_note("nope", "x", "y").unwrap_err();

    assert!(matches!(err, StoreError::NotFound(ref id) if id == "nope"));
    assert_eq!(serde_json::to_vec(store.notes()).unwrap(), before);
    assert_eq!(store.len(), 2);
}

#[test]
fn update_touches_only_the_first_matching_note() {
    let mut store = NoteStore::from_notes(vec![
        Note::new("dup", "one", "1", 0),
        Note::new("dup", "two", "2", 0),
    ])
    .unwrap();

    store.update_note("dup", "changed", "c").unwrap();

    assert_eq!(store.notes()[0].title, "changed");
    assert_eq!(store.notes()[1].title, "two");
    assert_eq!(store.notes()[1].last_modified, 0);
}

#[test]
fn add_note_checked_produces_unique_ids() {
    let mut store = NoteStore::new();
    for idx in 0..50 {
        store.add_note_checked(format!("n{idx}"), "", 8).unwrap();
    }
    let unique: HashSet<&str> = store.iter().map(|note| note.id.as_str()).collect();
    assert_eq!(unique.len(), 50);
}
