use notestore_core::{
    load_notes, BundledSeed, DurableSource, FileDurableSource, FileSeedSource, LoadFailureKind,
    LoadOrigin, LoadTier, MemoryDurableSource, MemorySeedSource, Note, NoteStore,
};
use std::fs;

const SEED_ONE: &str =
    r#"[{"id":"abc","title":"Hi","body":"World","dateCreated":0,"lastModified":0}]"#;

#[test]
fn durable_document_wins_over_seed() {
    let durable = MemoryDurableSource::with_contents(
        r#"[{"id":"u1","title":"mine","body":"","dateCreated":3,"lastModified":5}]"#,
    );
    let seed = MemorySeedSource::new(SEED_ONE);

    let outcome = load_notes(&durable, &seed);

    assert_eq!(outcome.origin, LoadOrigin::Durable);
    assert_eq!(outcome.notes, vec![Note {
        id: "u1".to_string(),
        title: "mine".to_string(),
        body: String::new(),
        date_created: 3,
        last_modified: 5,
    }]);
    assert!(outcome.failures.is_empty());
}

#[test]
fn missing_durable_file_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let durable = FileDurableSource::new(dir.path().join("notes.json"));
    let seed = MemorySeedSource::new(SEED_ONE);

    let (store, origin) = NoteStore::load(&durable, &seed);

    assert_eq!(origin, LoadOrigin::Seed);
    assert_eq!(store.len(), 1);
    assert_eq!(store.notes()[0], Note::new("abc", "Hi", "World", 0));
}

#[test]
fn corrupt_durable_file_falls_back_to_seed_and_records_decode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    fs::write(&path, b"{not json").unwrap();
    let durable = FileDurableSource::new(&path);
    let seed = MemorySeedSource::new(SEED_ONE);

    let outcome = load_notes(&durable, &seed);

    assert_eq!(outcome.origin, LoadOrigin::Seed);
    assert_eq!(outcome.notes.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].tier, LoadTier::Durable);
    assert_eq!(outcome.failures[0].kind, LoadFailureKind::Decode);
}

#[test]
fn durable_note_with_empty_id_is_treated_as_unreadable() {
    let durable = MemoryDurableSource::with_contents(
        r#"[{"id":"","title":"t","body":"b","dateCreated":0,"lastModified":0}]"#,
    );
    let seed = MemorySeedSource::new(SEED_ONE);

    let outcome = load_notes(&durable, &seed);

    assert_eq!(outcome.origin, LoadOrigin::Seed);
    assert_eq!(outcome.failures[0].kind, LoadFailureKind::Invalid);
}

#[test]
fn missing_durable_and_missing_seed_yield_empty_store() {
    let durable = MemoryDurableSource::new();
    let seed = MemorySeedSource::missing();

    let outcome = load_notes(&durable, &seed);

    assert_eq!(outcome.origin, LoadOrigin::Empty);
    assert!(outcome.notes.is_empty());
    let kinds: Vec<(LoadTier, LoadFailureKind)> = outcome
        .failures
        .iter()
        .map(|failure| (failure.tier, failure.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (LoadTier::Durable, LoadFailureKind::SourceUnavailable),
            (LoadTier::Seed, LoadFailureKind::SourceUnavailable),
        ]
    );
}

#[test]
fn malformed_seed_falls_through_to_empty() {
    let durable = MemoryDurableSource::new();
    let seed = MemorySeedSource::new("[{\"id\": 1}]");

    let (store, origin) = NoteStore::load(&durable, &seed);

    assert_eq!(origin, LoadOrigin::Empty);
    assert!(store.is_empty());
}

#[test]
fn seed_file_override_is_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let seed_path = dir.path().join("golden.json");
    fs::write(&seed_path, SEED_ONE).unwrap();
    let durable = MemoryDurableSource::new();

    let outcome = load_notes(&durable, &FileSeedSource::new(&seed_path));

    assert_eq!(outcome.origin, LoadOrigin::Seed);
    assert_eq!(outcome.notes[0].id, "abc");
}

#[test]
fn bundled_seed_is_used_on_first_launch() {
    let durable = MemoryDurableSource::new();

    let (store, origin) = NoteStore::load(&durable, &BundledSeed);

    assert_eq!(origin, LoadOrigin::Seed);
    assert!(!store.is_empty());
    let expected: Vec<Note> = serde_json::from_str(BundledSeed.as_str()).unwrap();
    assert_eq!(store.notes(), expected.as_slice());
}

#[test]
fn loading_never_writes_the_durable_source() {
    let durable = MemoryDurableSource::new();
    let _ = load_notes(&durable, &BundledSeed);
    assert_eq!(durable.read().unwrap(), None);
}
