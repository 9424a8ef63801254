//! Registries owning the persisted note and tag collections.
//!
//! # Responsibility
//! - Provide CRUD over one collection each, keyed by opaque id.
//! - Persist the whole collection after every effective mutation.
//!
//! # Invariants
//! - Mutations are copy-on-write: a new collection is built, saved, then
//!   swapped in. Snapshots handed out earlier never change.
//! - Update/delete on an absent id is a silent no-op and writes nothing.
//! - Neither registry reaches into the other's collection.

pub mod note_repo;
pub mod tag_repo;
