use notestore_core::{Note, NoteValidationError};

#[test]
fn note_new_starts_with_equal_timestamps() {
    let note = Note::new("abc", "Hi", "World", 42);

    assert_eq!(note.id, "abc");
    assert_eq!(note.title, "Hi");
    assert_eq!(note.body, "World");
    assert_eq!(note.date_created, 42);
    assert_eq!(note.last_modified, 42);
    assert!(note.validate().is_ok());
}

#[test]
fn note_serialization_uses_expected_wire_fields() {
    let note = Note::new("abc", "Hi", "World", 0);

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], "abc");
    assert_eq!(json["title"], "Hi");
    assert_eq!(json["body"], "World");
    assert_eq!(json["dateCreated"], 0);
    assert_eq!(json["lastModified"], 0);
    assert_eq!(json.as_object().unwrap().len(), 5);
}

#[test]
fn note_decodes_from_external_document() {
    let raw = r#"{"id":"k3Y9aB0qZx","title":"t","body":"b","dateCreated":7,"lastModified":9}"#;
    let note: Note = serde_json::from_str(raw).unwrap();
    assert_eq!(note.id, "k3Y9aB0qZx");
    assert_eq!(note.date_created, 7);
    assert_eq!(note.last_modified, 9);
}

#[test]
fn validate_rejects_blank_id() {
    let note = Note::new("   ", "t", "b", 0);
    assert_eq!(note.validate().unwrap_err(), NoteValidationError::EmptyId);
}

#[test]
fn validate_rejects_modified_before_created() {
    let mut note = Note::new("abc", "t", "b", 10);
    note.last_modified = 9;
    assert_eq!(
        note.validate().unwrap_err(),
        NoteValidationError::ModifiedBeforeCreated {
            date_created: 10,
            last_modified: 9,
        }
    );
}
