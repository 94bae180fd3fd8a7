//! In-memory note store and its mutation rules.
//!
//! # Responsibility
//! - Own the ordered note sequence for one installation.
//! - Generate ids and timestamps for new notes.
//! - Apply full title/body replacement on update.
//!
//! # Invariants
//! - Insertion order is iteration order; updates never reorder.
//! - Notes are only added through `add_note*`, so every stored id is non-empty.
//! - `update_note` bumps `last_modified` by exactly one.
//! - Mutations are in-memory only; durability is the caller's explicit
//!   `persist` call.

use crate::model::note::{Note, NoteId, NoteValidationError};
use log::{debug, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod id;
pub mod loader;
pub mod persist;
pub mod shared;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for mutation use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No note carries the requested id.
    NotFound(NoteId),
    /// Every generated candidate collided with an existing id.
    IdExhausted { attempts: u32 },
    /// A caller-provided note breaks model invariants.
    Validation(NoteValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::IdExhausted { attempts } => {
                write!(f, "no unique note id found after {attempts} attempt(s)")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::IdExhausted { .. } => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Source of `date_created` values for new notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteClock {
    /// Every note is created at 0; timestamps act as revision counters.
    #[default]
    Zero,
    /// Unix epoch milliseconds from the system clock.
    WallMillis,
}

impl NoteClock {
    pub fn now(self) -> i64 {
        match self {
            Self::Zero => 0,
            Self::WallMillis => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
                .unwrap_or(0),
        }
    }
}

/// Ordered collection of all notes for one installation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    notes: Vec<Note>,
    clock: NoteClock,
}

impl NoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over an already validated sequence.
    ///
    /// # Errors
    /// - Returns `StoreError::Validation` for the first invalid note.
    pub fn from_notes(notes: Vec<Note>) -> StoreResult<Self> {
        for note in &notes {
            note.validate()?;
        }
        Ok(Self {
            notes,
            clock: NoteClock::default(),
        })
    }

    /// Replaces the clock used for new notes.
    pub fn with_clock(mut self, clock: NoteClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> NoteClock {
        self.clock
    }

    /// Notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the first note with exactly this id.
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Appends a new note and returns a copy of it.
    ///
    /// The id is not checked against existing ids.
    pub fn add_note(&mut self, title: impl Into<String>, body: impl Into<String>) -> Note {
        self.add_note_with_rng(&mut rand::thread_rng(), title.into(), body.into())
    }

    /// Appends a new note whose id is guaranteed unique within the store.
    ///
    /// # Errors
    /// - Returns `StoreError::IdExhausted` when `max_attempts` candidates all
    ///   collide with existing ids. The store is left unchanged.
    pub fn add_note_checked(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        max_attempts: u32,
    ) -> StoreResult<Note> {
        self.add_note_checked_with_rng(
            &mut rand::thread_rng(),
            title.into(),
            body.into(),
            max_attempts,
        )
    }

    /// Replaces title and body of the first note matching `id`.
    ///
    /// # Errors
    /// - Returns `StoreError::NotFound` when no note matches; nothing changes.
    pub fn update_note(
        &mut self,
        id: &str,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> StoreResult<Note> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            debug!("event=store_update module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id.to_string()));
        };

        note.revise(title.into(), body.into());
        debug!(
            "event=store_update module=store status=ok note_id={} last_modified={}",
            note.id, note.last_modified
        );
        Ok(note.clone())
    }

    fn add_note_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        title: String,
        body: String,
    ) -> Note {
        let id = id::generate_note_id_with(rng);
        self.push_new(id, title, body)
    }

    fn add_note_checked_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        title: String,
        body: String,
        max_attempts: u32,
    ) -> StoreResult<Note> {
        for _ in 0..max_attempts {
            let candidate = id::generate_note_id_with(rng);
            if self.get(&candidate).is_none() {
                return Ok(self.push_new(candidate, title, body));
            }
        }

        warn!(
            "event=store_add module=store status=error error_code=id_exhausted attempts={} count={}",
            max_attempts,
            self.notes.len()
        );
        Err(StoreError::IdExhausted {
            attempts: max_attempts,
        })
    }

    fn push_new(&mut self, id: NoteId, title: String, body: String) -> Note {
        let note = Note::new(id, title, body, self.clock.now());
        self.notes.push(note.clone());
        debug!(
            "event=store_add module=store status=ok note_id={} count={}",
            note.id,
            self.notes.len()
        );
        note
    }
}

impl<'a> IntoIterator for &'a NoteStore {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
