//! Title/tag filtering over composed notes.
//!
//! # Invariants
//! - Title match is a case-insensitive substring test; empty query matches all.
//! - Tag match requires every selected tag (AND); empty selection matches all.
//! - Result keeps input order.

use crate::model::id::TagId;
use crate::model::note::ComposedNote;
use std::collections::BTreeSet;

/// Session-scoped list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub title_query: String,
    pub required_tags: BTreeSet<TagId>,
}

impl FilterCriteria {
    pub fn new(title_query: impl Into<String>, required_tags: BTreeSet<TagId>) -> Self {
        Self {
            title_query: title_query.into(),
            required_tags,
        }
    }

    /// Whether these criteria accept every note.
    pub fn is_empty(&self) -> bool {
        self.title_query.is_empty() && self.required_tags.is_empty()
    }

    /// Whether `note` passes both predicates.
    pub fn matches(&self, note: &ComposedNote) -> bool {
        self.matches_title(note) && self.matches_tags(note)
    }

    fn matches_title(&self, note: &ComposedNote) -> bool {
        self.title_query.is_empty()
            || note
                .title
                .to_lowercase()
                .contains(&self.title_query.to_lowercase())
    }

    fn matches_tags(&self, note: &ComposedNote) -> bool {
        self.required_tags
            .iter()
            .all(|tag_id| note.has_tag(tag_id))
    }
}

/// Returns the notes accepted by `criteria`, in input order.
pub fn filter(composed: &[ComposedNote], criteria: &FilterCriteria) -> Vec<ComposedNote> {
    composed
        .iter()
        .filter(|note| criteria.matches(note))
        .cloned()
        .collect()
}
