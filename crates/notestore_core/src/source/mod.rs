//! Byte-level storage seams consumed by the loader and persister.
//!
//! # Responsibility
//! - Abstract the durable user file and the bundled seed behind small traits.
//! - Keep "not found" distinguishable from "found but unreadable".
//!
//! # Invariants
//! - `DurableSource::read` returns `Ok(None)` only when nothing was ever written.
//! - `DurableSource::write` replaces the full contents; it never appends.

use std::io;

mod file;
mod memory;

pub use file::{FileDurableSource, FileSeedSource};
pub use memory::{MemoryDurableSource, MemorySeedSource};

/// Seed document compiled into the crate.
const BUNDLED_GOLDEN: &str = include_str!("../../assets/golden.json");

/// User-writable storage holding the persisted note collection.
pub trait DurableSource {
    /// Reads the full stored document, or `None` when it does not exist.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;
    /// Overwrites the stored document with `bytes`.
    fn write(&self, bytes: &[u8]) -> io::Result<()>;
    /// Short label used in log events.
    fn describe(&self) -> String;
}

/// Read-only seed document used when no durable data exists yet.
pub trait SeedSource {
    /// Reads the full seed document.
    fn read(&self) -> io::Result<Vec<u8>>;
    /// Short label used in log events.
    fn describe(&self) -> String;
}

/// The `golden` seed packaged with the application.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSeed;

impl BundledSeed {
    /// Raw JSON text of the bundled seed.
    pub fn as_str(&self) -> &'static str {
        BUNDLED_GOLDEN
    }
}

impl SeedSource for BundledSeed {
    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(BUNDLED_GOLDEN.as_bytes().to_vec())
    }

    fn describe(&self) -> String {
        "bundled:golden".to_string()
    }
}
