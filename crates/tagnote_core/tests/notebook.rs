use std::collections::BTreeSet;
use tagnote_core::db::open_db;
use tagnote_core::{
    MemoryKvBackend, NoteData, NoteId, Notebook, PersistentStore, SqliteKvBackend, StoreError,
    TagId,
};

#[test]
fn renamed_tag_is_visible_through_note_reference() {
    let store = PersistentStore::new(MemoryKvBackend::new());
    let mut notebook = Notebook::load(&store).unwrap();

    let work = notebook.add_tag("work").unwrap();
    let note_id = notebook
        .create_note(&NoteData::new("Plan", "...", vec![work.clone()]))
        .unwrap();
    assert!(notebook.update_tag(&work.id, "office").unwrap());

    let note = notebook.note(&note_id).unwrap();
    assert_eq!(note.tags.len(), 1);
    assert_eq!(note.tags[0].id, work.id);
    assert_eq!(note.tags[0].label, "office");
}

#[test]
fn title_query_is_case_insensitive_substring() {
    let store = PersistentStore::new(MemoryKvBackend::new());
    let mut notebook = Notebook::load(&store).unwrap();
    let alpha = notebook
        .create_note(&NoteData::new("Alpha", "", Vec::new()))
        .unwrap();
    notebook
        .create_note(&NoteData::new("Beta", "", Vec::new()))
        .unwrap();

    notebook.set_title_query("al");
    let visible = notebook.visible_notes();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, alpha);

    notebook.set_title_query("");
    assert_eq!(notebook.visible_notes().len(), 2);
}

#[test]
fn composed_view_tracks_every_mutation() {
    let store = PersistentStore::new(MemoryKvBackend::new());
    let mut notebook = Notebook::load(&store).unwrap();
    let work = notebook.add_tag("work").unwrap();
    let home = notebook.add_tag("home").unwrap();
    let id = notebook
        .create_note(&NoteData::new("Plan", "v1", vec![work.clone()]))
        .unwrap();
    let before = notebook.notes();

    notebook
        .update_note(&id, &NoteData::new("Plan", "v2", vec![home.clone()]))
        .unwrap();
    assert_eq!(before[0].body, "v1");
    assert_eq!(notebook.note(&id).unwrap().body, "v2");
    assert_eq!(notebook.note(&id).unwrap().tags, vec![home.clone()]);

    notebook.delete_tag(&home.id).unwrap();
    assert!(notebook.note(&id).unwrap().tags.is_empty());
    assert_eq!(
        notebook.note_registry().get(&id).unwrap().tag_ids,
        vec![home.id]
    );

    assert!(notebook.delete_note(&id).unwrap());
    assert!(notebook.note(&id).is_none());
    assert!(notebook.notes().is_empty());
}

#[test]
fn unknown_ids_are_silent_noops() {
    let store = PersistentStore::new(MemoryKvBackend::new());
    let mut notebook = Notebook::load(&store).unwrap();
    notebook
        .create_note(&NoteData::new("kept", "", Vec::new()))
        .unwrap();

    let missing_note = NoteId::from("missing");
    let missing_tag = TagId::from("missing");
    assert!(!notebook
        .update_note(&missing_note, &NoteData::default())
        .unwrap());
    assert!(!notebook.delete_note(&missing_note).unwrap());
    assert!(!notebook.update_tag(&missing_tag, "x").unwrap());
    assert!(!notebook.delete_tag(&missing_tag).unwrap());
    assert_eq!(notebook.notes().len(), 1);
}

#[test]
fn deleted_tag_leaves_filter_selection() {
    let store = PersistentStore::new(MemoryKvBackend::new());
    let mut notebook = Notebook::load(&store).unwrap();
    let work = notebook.add_tag("work").unwrap();
    let home = notebook.add_tag("home").unwrap();
    notebook
        .create_note(&NoteData::new("Plan", "", vec![home.clone()]))
        .unwrap();

    notebook.set_required_tags(BTreeSet::from([work.id.clone(), home.id.clone()]));
    assert!(notebook.visible_notes().is_empty());

    notebook.delete_tag(&work.id).unwrap();
    assert_eq!(
        notebook.criteria().required_tags,
        BTreeSet::from([home.id.clone()])
    );
    assert_eq!(notebook.visible_notes().len(), 1);
}

#[test]
fn session_reloads_from_sqlite_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.db");

    let (first, second, tag_id) = {
        let conn = open_db(&path).unwrap();
        let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());
        let mut notebook = Notebook::load(&store).unwrap();
        let tag = notebook.add_tag("work").unwrap();
        let first = notebook
            .create_note(&NoteData::new("first", "", vec![tag.clone()]))
            .unwrap();
        let second = notebook
            .create_note(&NoteData::new("second", "", Vec::new()))
            .unwrap();
        notebook.set_title_query("sec");
        (first, second, tag.id)
    };

    let conn = open_db(&path).unwrap();
    let store = PersistentStore::new(SqliteKvBackend::try_new(&conn).unwrap());
    let notebook = Notebook::load(&store).unwrap();
    let ids: Vec<NoteId> = notebook.notes().iter().map(|n| n.id.clone()).collect();
    assert_eq!(ids, vec![first.clone(), second]);
    assert!(notebook.note(&first).unwrap().has_tag(&tag_id));
    assert!(notebook.criteria().is_empty());
}

#[test]
fn corrupted_tags_slot_prevents_session_start() {
    let backend = MemoryKvBackend::new();
    backend.insert_raw("TAGS", "not json");
    let store = PersistentStore::new(backend);

    let err = Notebook::load(&store).err().unwrap();
    assert!(matches!(err, StoreError::Corrupted { key: "TAGS", .. }));
}
