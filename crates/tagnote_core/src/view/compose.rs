//! Join of stored notes with the tag collection.
//!
//! # Invariants
//! - Output order equals stored note order.
//! - A note's resolved tags follow the tag collection's order.
//! - Tag ids that do not resolve are dropped without error.

use crate::model::id::TagId;
use crate::model::note::{ComposedNote, StoredNote};
use crate::model::tag::Tag;
use std::collections::HashSet;

/// Resolves every note's tag references against `tags`.
pub fn compose(notes: &[StoredNote], tags: &[Tag]) -> Vec<ComposedNote> {
    notes.iter().map(|note| compose_one(note, tags)).collect()
}

/// Resolves one note's tag references against `tags`.
pub fn compose_one(note: &StoredNote, tags: &[Tag]) -> ComposedNote {
    let referenced: HashSet<&TagId> = note.tag_ids.iter().collect();
    ComposedNote {
        id: note.id.clone(),
        title: note.title.clone(),
        body: note.body.clone(),
        tags: tags
            .iter()
            .filter(|tag| referenced.contains(&tag.id))
            .cloned()
            .collect(),
    }
}
