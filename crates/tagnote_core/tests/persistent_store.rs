use tagnote_core::db::{open_db, open_db_in_memory};
use tagnote_core::{
    NoteData, NoteRegistry, PersistentStore, SqliteKvBackend, StoreError, StoredNote, Tag,
    TagRegistry, NOTES_SLOT, TAGS_SLOT,
};

#[test]
fn sqlite_slots_round_trip_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.db");

    let work = Tag::new("work");
    let notes = vec![
        StoredNote::new(&NoteData::new("Plan", "# heading\n\n- item", vec![work.clone()])),
        StoredNote::new(&NoteData::new("Empty", "", Vec::new())),
    ];
    {
        let conn = open_db(&path).unwrap();
        let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());
        store.save(TAGS_SLOT, &vec![work.clone()]).unwrap();
        store.save(NOTES_SLOT, &notes).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());
    assert_eq!(store.load_or(TAGS_SLOT, Vec::new()).unwrap(), vec![work]);
    assert_eq!(store.load_or(NOTES_SLOT, Vec::new()).unwrap(), notes);
}

#[test]
fn save_replaces_previous_value() {
    let conn = open_db_in_memory().unwrap();
    let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());

    store.save(TAGS_SLOT, &vec![Tag::new("first")]).unwrap();
    let second = vec![Tag::new("second")];
    store.save(TAGS_SLOT, &second).unwrap();

    assert_eq!(store.load_or(TAGS_SLOT, Vec::new()).unwrap(), second);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn absent_slot_is_not_written_on_load() {
    let conn = open_db_in_memory().unwrap();
    let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());

    assert!(store.load_or(NOTES_SLOT, Vec::new()).unwrap().is_empty());
    assert!(!store.contains(NOTES_SLOT).unwrap());
}

#[test]
fn corrupted_sqlite_slot_fails_registry_load() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_slots (key, value) VALUES ('NOTES', '[{\"id\": 1}]');",
        [],
    )
    .unwrap();
    let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());

    let err = NoteRegistry::load(&store).err().unwrap();
    assert!(matches!(err, StoreError::Corrupted { key: "NOTES", .. }));
    assert!(err.to_string().contains("NOTES"));

    // The other slot is independent.
    assert!(TagRegistry::load(&store).is_ok());
}

#[test]
fn registries_persist_through_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registries.db");

    let (tag, note_id) = {
        let conn = open_db(&path).unwrap();
        let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());
        let mut tags = TagRegistry::load(&store).unwrap();
        let mut notes = NoteRegistry::load(&store).unwrap();
        let tag = tags.add_tag("work").unwrap();
        let note_id = notes
            .create_note(&NoteData::new("Plan", "body", vec![tag.clone()]))
            .unwrap();
        (tag, note_id)
    };

    let conn = open_db(&path).unwrap();
    let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());
    let tags = TagRegistry::load(&store).unwrap();
    let notes = NoteRegistry::load(&store).unwrap();
    assert_eq!(tags.get(&tag.id), Some(&tag));
    assert_eq!(notes.get(&note_id).unwrap().tag_ids, vec![tag.id]);
}
