//! Derived note views.
//!
//! Both functions here are pure: they read snapshots and build fresh output,
//! nothing is cached or persisted.

pub mod compose;
pub mod filter;
