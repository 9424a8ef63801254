//! Use-case controllers.
//!
//! # Responsibility
//! - Coordinate the registries and keep derived views current.
//! - Keep presentation/routing decoupled from storage details.

pub mod notebook;
