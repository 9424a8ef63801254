//! Opaque identifiers for tags and notes.
//!
//! Ids are generated as random UUID v4 strings but are never parsed back:
//! any string loaded from storage is accepted as-is.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrows the raw id text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

opaque_id!(
    /// Stable identifier of a tag, used as a reference from notes.
    TagId
);

opaque_id!(
    /// Stable identifier of a note; exposed to routing as a path segment.
    NoteId
);

#[cfg(test)]
mod tests {
    use super::{NoteId, TagId};

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TagId::generate(), TagId::generate());
        assert_ne!(NoteId::generate(), NoteId::generate());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = TagId::from("not-a-uuid");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"not-a-uuid\"");
        let decoded: TagId = serde_json::from_str("\"not-a-uuid\"").unwrap();
        assert_eq!(decoded, id);
    }
}
