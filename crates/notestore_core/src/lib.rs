//! Embedded JSON-file note store.
//! This crate owns the note model, the three-tier loader and the persister.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use source::{
    BundledSeed, DurableSource, FileDurableSource, FileSeedSource, MemoryDurableSource,
    MemorySeedSource, SeedSource,
};
pub use store::id::{generate_note_id, NOTE_ID_LEN};
pub use store::loader::{
    load_notes, LoadFailure, LoadFailureKind, LoadOrigin, LoadOutcome, LoadTier,
};
pub use store::persist::{persist, PersistFailureKind, PersistReport};
pub use store::shared::SharedNoteStore;
pub use store::{NoteClock, NoteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
