//! In-memory sources for embedding and tests.

use super::{DurableSource, SeedSource};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Durable document kept in process memory.
///
/// `fail_writes` makes every write return `PermissionDenied`, which lets
/// callers exercise the persist failure path without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryDurableSource {
    contents: Mutex<Option<Vec<u8>>>,
    fail_writes: bool,
    reads: AtomicUsize,
}

impl MemoryDurableSource {
    /// Empty source: reads report "not found".
    pub fn new() -> Self {
        Self::default()
    }

    /// Source pre-populated with `bytes`.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Mutex::new(Some(bytes.into())),
            ..Self::default()
        }
    }

    /// Source that rejects every write.
    pub fn read_only() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Current stored bytes, if any.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.lock().clone()
    }

    /// Number of `read` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DurableSource for MemoryDurableSource {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock().clone())
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "memory source is read-only",
            ));
        }
        *self.lock() = Some(bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Seed document kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySeedSource {
    contents: Option<Vec<u8>>,
}

impl MemorySeedSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(bytes.into()),
        }
    }

    /// Seed that is absent from the build.
    pub fn missing() -> Self {
        Self { contents: None }
    }
}

impl SeedSource for MemorySeedSource {
    fn read(&self) -> io::Result<Vec<u8>> {
        self.contents
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "seed resource is missing"))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
