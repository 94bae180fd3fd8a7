//! Domain model for stored notes.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, loader and persister.
//! - Own the wire shape of the durable JSON file.
//!
//! # Invariants
//! - Every note carries a non-empty `id` that never changes after creation.
//! - `last_modified >= date_created` for every note.

pub mod note;
