//! Note domain model.
//!
//! # Responsibility
//! - Define the record persisted in `notes.json` and the bundled seed.
//! - Validate identity and timestamp invariants for decoded records.
//!
//! # Invariants
//! - `id` is non-empty and immutable after creation.
//! - `last_modified` starts equal to `date_created` and only grows.
//! - Wire field names are `id|title|body|dateCreated|lastModified`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-local note identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// Validation failure for one note record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `id` is empty or whitespace.
    EmptyId,
    /// `last_modified` is older than `date_created`.
    ModifiedBeforeCreated {
        date_created: i64,
        last_modified: i64,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id must not be empty"),
            Self::ModifiedBeforeCreated {
                date_created,
                last_modified,
            } => write!(
                f,
                "lastModified ({last_modified}) must be >= dateCreated ({date_created})"
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// One user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Generated at creation, unique within the store.
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// Creation stamp. Opaque ordering value unless the store clock says otherwise.
    pub date_created: i64,
    /// Starts at `date_created`, bumped by one on every update.
    pub last_modified: i64,
}

impl Note {
    /// Creates a note whose `last_modified` equals `date_created`.
    pub fn new(
        id: impl Into<NoteId>,
        title: impl Into<String>,
        body: impl Into<String>,
        date_created: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            date_created,
            last_modified: date_created,
        }
    }

    /// Checks identity and timestamp invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.last_modified < self.date_created {
            return Err(NoteValidationError::ModifiedBeforeCreated {
                date_created: self.date_created,
                last_modified: self.last_modified,
            });
        }
        Ok(())
    }

    /// Replaces title and body and bumps `last_modified` by one.
    pub(crate) fn revise(&mut self, title: String, body: String) {
        self.title = title;
        self.body = body;
        self.last_modified = self.last_modified.saturating_add(1);
    }
}
