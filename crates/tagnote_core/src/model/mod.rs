//! Note/tag domain model.
//!
//! # Responsibility
//! - Define the normalized records persisted by the registries.
//! - Define the denormalized note shape handed to presentation.
//!
//! # Invariants
//! - Every record is identified by a stable opaque id.
//! - Records are immutable values; edits build new records.

pub mod id;
pub mod note;
pub mod tag;
