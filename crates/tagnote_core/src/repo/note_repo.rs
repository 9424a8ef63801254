//! Note registry over the `NOTES` slot.
//!
//! # Responsibility
//! - Store notes normalized: tag references are ids only.
//! - Keep insertion order; edits never move a note.
//!
//! # Invariants
//! - `update_note` replaces title, body and tag references; id and position stay.
//! - Tag references are not validated against the tag registry; dangling ids
//!   are tolerated and resolved away at composition time.

use crate::model::id::NoteId;
use crate::model::note::{NoteData, StoredNote};
use crate::store::{KvBackend, PersistentStore, StoreResult, NOTES_SLOT};
use log::{debug, info};
use std::sync::Arc;

/// Owner of the stored note collection.
pub struct NoteRegistry<'s, B: KvBackend> {
    store: &'s PersistentStore<B>,
    notes: Arc<Vec<StoredNote>>,
}

impl<'s, B: KvBackend> NoteRegistry<'s, B> {
    /// Loads the note collection, starting empty when nothing was saved.
    pub fn load(store: &'s PersistentStore<B>) -> StoreResult<Self> {
        let notes = store.load_or_else(NOTES_SLOT, Vec::new)?;
        info!(
            "event=registry_load module=note_registry status=ok count={}",
            notes.len()
        );
        Ok(Self {
            store,
            notes: Arc::new(notes),
        })
    }

    /// Returns the current collection; later mutations do not affect it.
    pub fn snapshot(&self) -> Arc<Vec<StoredNote>> {
        Arc::clone(&self.notes)
    }

    pub fn get(&self, id: &NoteId) -> Option<&StoredNote> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Appends a note built from `data` and returns its fresh id.
    pub fn create_note(&mut self, data: &NoteData) -> StoreResult<NoteId> {
        let note = StoredNote::new(data);
        let id = note.id.clone();
        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.extend(self.notes.iter().cloned());
        next.push(note);
        self.commit(next)?;
        info!(
            "event=note_create module=note_registry status=ok note_id={} tag_refs={} count={}",
            id,
            data.tags.len(),
            self.notes.len()
        );
        Ok(id)
    }

    /// Replaces title, body and tag references of note `id` in place.
    ///
    /// Returns `false` without persisting when `id` is unknown.
    pub fn update_note(&mut self, id: &NoteId, data: &NoteData) -> StoreResult<bool> {
        if self.get(id).is_none() {
            debug!("event=note_update module=note_registry status=noop note_id={id}");
            return Ok(false);
        }

        let next = self
            .notes
            .iter()
            .map(|note| {
                if &note.id == id {
                    note.with_data(data)
                } else {
                    note.clone()
                }
            })
            .collect();
        self.commit(next)?;
        info!("event=note_update module=note_registry status=ok note_id={id}");
        Ok(true)
    }

    /// Removes note `id`.
    ///
    /// Returns `false` without persisting when `id` is unknown.
    pub fn delete_note(&mut self, id: &NoteId) -> StoreResult<bool> {
        if self.get(id).is_none() {
            debug!("event=note_delete module=note_registry status=noop note_id={id}");
            return Ok(false);
        }

        let next = self
            .notes
            .iter()
            .filter(|note| &note.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        info!(
            "event=note_delete module=note_registry status=ok note_id={} count={}",
            id,
            self.notes.len()
        );
        Ok(true)
    }

    fn commit(&mut self, next: Vec<StoredNote>) -> StoreResult<()> {
        self.store.save(NOTES_SLOT, &next)?;
        self.notes = Arc::new(next);
        Ok(())
    }
}
