//! Tag registry over the `TAGS` slot.
//!
//! # Invariants
//! - New tags are appended; collection order is insertion order.
//! - Deleting a tag never touches notes referencing it.

use crate::model::id::TagId;
use crate::model::tag::Tag;
use crate::store::{KvBackend, PersistentStore, StoreResult, TAGS_SLOT};
use log::{debug, info};
use std::sync::Arc;

/// Owner of the tag collection.
pub struct TagRegistry<'s, B: KvBackend> {
    store: &'s PersistentStore<B>,
    tags: Arc<Vec<Tag>>,
}

impl<'s, B: KvBackend> TagRegistry<'s, B> {
    /// Loads the tag collection, starting empty when nothing was saved.
    pub fn load(store: &'s PersistentStore<B>) -> StoreResult<Self> {
        let tags = store.load_or_else(TAGS_SLOT, Vec::new)?;
        info!(
            "event=registry_load module=tag_registry status=ok count={}",
            tags.len()
        );
        Ok(Self {
            store,
            tags: Arc::new(tags),
        })
    }

    /// Returns the current collection; later mutations do not affect it.
    pub fn snapshot(&self) -> Arc<Vec<Tag>> {
        Arc::clone(&self.tags)
    }

    pub fn get(&self, id: &TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| &tag.id == id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Creates a tag with a fresh id and appends it.
    pub fn add_tag(&mut self, label: impl Into<String>) -> StoreResult<Tag> {
        let tag = Tag::new(label);
        let mut next = Vec::with_capacity(self.tags.len() + 1);
        next.extend(self.tags.iter().cloned());
        next.push(tag.clone());
        self.commit(next)?;
        info!(
            "event=tag_add module=tag_registry status=ok tag_id={} count={}",
            tag.id,
            self.tags.len()
        );
        Ok(tag)
    }

    /// Replaces the label of tag `id`.
    ///
    /// Returns `false` without persisting when `id` is unknown.
    pub fn update_tag(&mut self, id: &TagId, label: impl Into<String>) -> StoreResult<bool> {
        if self.get(id).is_none() {
            debug!("event=tag_update module=tag_registry status=noop tag_id={id}");
            return Ok(false);
        }

        let label = label.into();
        let next = self
            .tags
            .iter()
            .map(|tag| {
                if &tag.id == id {
                    tag.with_label(label.as_str())
                } else {
                    tag.clone()
                }
            })
            .collect();
        self.commit(next)?;
        info!("event=tag_update module=tag_registry status=ok tag_id={id}");
        Ok(true)
    }

    /// Removes tag `id`. Notes keep their reference to it.
    ///
    /// Returns `false` without persisting when `id` is unknown.
    pub fn delete_tag(&mut self, id: &TagId) -> StoreResult<bool> {
        if self.get(id).is_none() {
            debug!("event=tag_delete module=tag_registry status=noop tag_id={id}");
            return Ok(false);
        }

        let next = self
            .tags
            .iter()
            .filter(|tag| &tag.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        info!(
            "event=tag_delete module=tag_registry status=ok tag_id={} count={}",
            id,
            self.tags.len()
        );
        Ok(true)
    }

    fn commit(&mut self, next: Vec<Tag>) -> StoreResult<()> {
        self.store.save(TAGS_SLOT, &next)?;
        self.tags = Arc::new(next);
        Ok(())
    }
}
