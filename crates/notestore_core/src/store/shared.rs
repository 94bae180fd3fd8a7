//! Load-once store handle shared by every consumer of one installation.
//!
//! # Responsibility
//! - Run the loader at most once per handle, even under concurrent first use.
//! - Serialize access to the store behind one mutex.
//!
//! # Invariants
//! - The first `get_or_load` call wins; later calls never touch any source.
//! - A poisoned mutex is recovered rather than propagated.

use super::loader::{load_notes, LoadOrigin};
use super::persist::{persist, PersistReport};
use super::{NoteClock, NoteStore};
use crate::source::{DurableSource, SeedSource};
use once_cell::sync::OnceCell;
use std::sync::{Mutex, MutexGuard};

struct Loaded {
    store: Mutex<NoteStore>,
    origin: LoadOrigin,
}

/// Application-owned handle to the single note store.
///
/// Construct one at startup and pass it by reference.
#[derive(Default)]
pub struct SharedNoteStore {
    cell: OnceCell<Loaded>,
    clock: NoteClock,
}

impl SharedNoteStore {
    /// Creates a handle with nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle whose loaded store stamps new notes with `clock`.
    pub fn with_clock(clock: NoteClock) -> Self {
        Self {
            cell: OnceCell::new(),
            clock,
        }
    }

    /// Creates a handle that is already populated.
    pub fn from_store(store: NoteStore, origin: LoadOrigin) -> Self {
        let clock = store.clock();
        let cell = OnceCell::new();
        let _ = cell.set(Loaded {
            store: Mutex::new(store),
            origin,
        });
        Self { cell, clock }
    }

    /// Returns the store, running the three-tier loader on first use.
    pub fn get_or_load(
        &self,
        durable: &dyn DurableSource,
        seed: &dyn SeedSource,
    ) -> MutexGuard<'_, NoteStore> {
        let loaded = self.cell.get_or_init(|| {
            let outcome = load_notes(durable, seed);
            Loaded {
                store: Mutex::new(NoteStore::from_loaded(outcome.notes).with_clock(self.clock)),
                origin: outcome.origin,
            }
        });
        lock(&loaded.store)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Tier the store was loaded from, once loaded.
    pub fn origin(&self) -> Option<LoadOrigin> {
        self.cell.get().map(|loaded| loaded.origin)
    }

    /// Runs `f` against the loaded store; `None` before the first load.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut NoteStore) -> T) -> Option<T> {
        let loaded = self.cell.get()?;
        let mut guard = lock(&loaded.store);
        Some(f(&mut guard))
    }

    /// Persists the loaded store; `None` before the first load.
    pub fn persist(&self, durable: &dyn DurableSource) -> Option<PersistReport> {
        self.with_store(|store| persist(durable, store))
    }
}

fn lock(store: &Mutex<NoteStore>) -> MutexGuard<'_, NoteStore> {
    store
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
