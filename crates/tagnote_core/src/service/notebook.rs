//! Notebook controller: both registries plus the derived note views.
//!
//! # Responsibility
//! - Load the tag and note collections once per session.
//! - Route each mutation to exactly one registry.
//! - Recompute the composed view whole after every effective mutation.
//! - Hold the session's filter criteria and expose the visible subset.
//!
//! # Invariants
//! - `notes()` always equals `compose(note snapshot, tag snapshot)`.
//! - Filter criteria are never persisted.
//! - No mutation touches both registries.

use crate::model::id::{NoteId, TagId};
use crate::model::note::{ComposedNote, NoteData};
use crate::model::tag::Tag;
use crate::repo::note_repo::NoteRegistry;
use crate::repo::tag_repo::TagRegistry;
use crate::store::{KvBackend, PersistentStore, StoreResult};
use crate::view::compose::compose;
use crate::view::filter::{filter, FilterCriteria};
use log::{debug, info};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// Session controller over one [`PersistentStore`].
pub struct Notebook<'s, B: KvBackend> {
    tags: TagRegistry<'s, B>,
    notes: NoteRegistry<'s, B>,
    composed: Arc<Vec<ComposedNote>>,
    criteria: FilterCriteria,
}

impl<'s, B: KvBackend> Notebook<'s, B> {
    /// Loads both collections and derives the initial view.
    ///
    /// # Errors
    /// - `StoreError::Corrupted` when either slot holds undecodable text; the
    ///   session must not start in that case.
    pub fn load(store: &'s PersistentStore<B>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let tags = TagRegistry::load(store)?;
        let notes = NoteRegistry::load(store)?;
        let mut notebook = Self {
            tags,
            notes,
            composed: Arc::new(Vec::new()),
            criteria: FilterCriteria::default(),
        };
        notebook.recompose();
        info!(
            "event=notebook_load module=notebook status=ok notes={} tags={} duration_ms={}",
            notebook.notes.len(),
            notebook.tags.len(),
            started_at.elapsed().as_millis()
        );
        Ok(notebook)
    }

    /// All notes with resolved tags, in insertion order.
    pub fn notes(&self) -> Arc<Vec<ComposedNote>> {
        Arc::clone(&self.composed)
    }

    /// All tags, in insertion order.
    pub fn tags(&self) -> Arc<Vec<Tag>> {
        self.tags.snapshot()
    }

    /// Looks up one composed note, e.g. for a detail or edit route.
    pub fn note(&self, id: &NoteId) -> Option<&ComposedNote> {
        self.composed.iter().find(|note| &note.id == id)
    }

    pub fn tag_registry(&self) -> &TagRegistry<'s, B> {
        &self.tags
    }

    pub fn note_registry(&self) -> &NoteRegistry<'s, B> {
        &self.notes
    }

    pub fn add_tag(&mut self, label: impl Into<String>) -> StoreResult<Tag> {
        let tag = self.tags.add_tag(label)?;
        self.recompose();
        Ok(tag)
    }

    pub fn update_tag(&mut self, id: &TagId, label: impl Into<String>) -> StoreResult<bool> {
        let changed = self.tags.update_tag(id, label)?;
        self.recompose_if(changed);
        Ok(changed)
    }

    /// Deletes a tag. Notes keep the dangling reference; it simply stops
    /// resolving, and it is dropped from the filter selection.
    pub fn delete_tag(&mut self, id: &TagId) -> StoreResult<bool> {
        let changed = self.tags.delete_tag(id)?;
        if changed {
            self.criteria.required_tags.remove(id);
        }
        self.recompose_if(changed);
        Ok(changed)
    }

    pub fn create_note(&mut self, data: &NoteData) -> StoreResult<NoteId> {
        let id = self.notes.create_note(data)?;
        self.recompose();
        Ok(id)
    }

    pub fn update_note(&mut self, id: &NoteId, data: &NoteData) -> StoreResult<bool> {
        let changed = self.notes.update_note(id, data)?;
        self.recompose_if(changed);
        Ok(changed)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> StoreResult<bool> {
        let changed = self.notes.delete_note(id)?;
        self.recompose_if(changed);
        Ok(changed)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_title_query(&mut self, title_query: impl Into<String>) {
        self.criteria.title_query = title_query.into();
    }

    pub fn set_required_tags(&mut self, required_tags: BTreeSet<TagId>) {
        self.criteria.required_tags = required_tags;
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Notes passing the current criteria, in insertion order.
    pub fn visible_notes(&self) -> Vec<ComposedNote> {
        filter(&self.composed, &self.criteria)
    }

    fn recompose_if(&mut self, changed: bool) {
        if changed {
            self.recompose();
        }
    }

    fn recompose(&mut self) {
        let notes = self.notes.snapshot();
        let tags = self.tags.snapshot();
        self.composed = Arc::new(compose(&notes, &tags));
        debug!(
            "event=view_compose module=notebook status=ok notes={} tags={}",
            notes.len(),
            tags.len()
        );
    }
}
