//! Tag record.

use crate::model::id::TagId;
use serde::{Deserialize, Serialize};

/// Normalized, storage-level tag.
///
/// Labels are not unique; two tags may share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
}

impl Tag {
    /// Creates a tag with a freshly generated id.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(TagId::generate(), label)
    }

    /// Creates a tag with a caller-provided id.
    pub fn with_id(id: TagId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Returns a copy of this tag carrying `label`; the id is kept.
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            label: label.into(),
        }
    }
}
