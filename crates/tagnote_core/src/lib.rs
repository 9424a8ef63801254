//! Core domain logic for tagged notes.
//! This crate owns the note/tag data model, its persistence and the derived views.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::id::{NoteId, TagId};
pub use model::note::{ComposedNote, NoteData, StoredNote};
pub use model::tag::Tag;
pub use repo::note_repo::NoteRegistry;
pub use repo::tag_repo::TagRegistry;
pub use service::notebook::Notebook;
pub use store::{
    KvBackend, MemoryKvBackend, PersistentStore, Slot, SqliteKvBackend, StoreError, StoreResult,
    NOTES_SLOT, TAGS_SLOT,
};
pub use view::compose::{compose, compose_one};
pub use view::filter::{filter, FilterCriteria};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
