//! Note records: the normalized stored shape and the composed view shape.
//!
//! # Invariants
//! - `StoredNote::tag_ids` holds each id at most once, first occurrence wins.
//! - `ComposedNote` is derived on demand and never persisted.

use crate::model::id::{NoteId, TagId};
use crate::model::tag::Tag;
use serde::{Deserialize, Serialize};

/// Editable note content as submitted by a note form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteData {
    pub title: String,
    /// Markdown source; rendering happens outside the core.
    pub body: String,
    /// Tags picked for the note; only their ids are stored.
    pub tags: Vec<Tag>,
}

impl NoteData {
    pub fn new(title: impl Into<String>, body: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags,
        }
    }
}

/// Normalized note as persisted in the `NOTES` slot.
///
/// Wire field names (`markdown`, `tagIds`) are kept stable for stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNote {
    pub id: NoteId,
    pub title: String,
    #[serde(rename = "markdown")]
    pub body: String,
    #[serde(rename = "tagIds")]
    pub tag_ids: Vec<TagId>,
}

impl StoredNote {
    /// Creates a stored note with a fresh id from submitted content.
    pub fn new(data: &NoteData) -> Self {
        Self {
            id: NoteId::generate(),
            title: data.title.clone(),
            body: data.body.clone(),
            tag_ids: unique_tag_ids(&data.tags),
        }
    }

    /// Returns a copy with title, body and tag references replaced.
    ///
    /// The id is kept, so the note stays addressable across edits.
    pub fn with_data(&self, data: &NoteData) -> Self {
        Self {
            id: self.id.clone(),
            title: data.title.clone(),
            body: data.body.clone(),
            tag_ids: unique_tag_ids(&data.tags),
        }
    }

    /// Whether this note references `tag_id`, resolved or not.
    pub fn references(&self, tag_id: &TagId) -> bool {
        self.tag_ids.contains(tag_id)
    }
}

/// Display-ready note with tag references resolved to full tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedNote {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// Resolved tags, in tag-collection order.
    pub tags: Vec<Tag>,
}

impl ComposedNote {
    /// Whether `tag_id` is among the resolved tags.
    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tags.iter().any(|tag| &tag.id == tag_id)
    }
}

fn unique_tag_ids(tags: &[Tag]) -> Vec<TagId> {
    let mut ids: Vec<TagId> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !ids.contains(&tag.id) {
            ids.push(tag.id.clone());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::{NoteData, StoredNote};
    use crate::model::tag::Tag;

    #[test]
    fn duplicate_tags_are_stored_once() {
        let work = Tag::new("work");
        let data = NoteData::new("t", "b", vec![work.clone(), work.clone()]);
        let note = StoredNote::new(&data);
        assert_eq!(note.tag_ids, vec![work.id]);
    }

    #[test]
    fn with_data_keeps_identity() {
        let note = StoredNote::new(&NoteData::new("old", "body", Vec::new()));
        let edited = note.with_data(&NoteData::new("new", "other", Vec::new()));
        assert_eq!(edited.id, note.id);
        assert_eq!(edited.title, "new");
        assert_eq!(note.title, "old");
    }

    #[test]
    fn stored_note_uses_stable_wire_fields() {
        let tag = Tag::new("work");
        let note = StoredNote::new(&NoteData::new("Plan", "# md", vec![tag.clone()]));
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], note.id.as_str());
        assert_eq!(json["markdown"], "# md");
        assert_eq!(json["tagIds"][0], tag.id.as_str());
        assert!(json.get("body").is_none());
    }
}
