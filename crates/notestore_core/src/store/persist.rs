//! Whole-collection persistence to the durable source.
//!
//! # Responsibility
//! - Serialize the full ordered store to JSON and replace the durable document.
//! - Report write failures as values instead of errors that unwind the caller.
//!
//! # Invariants
//! - Every call writes the complete current state; nothing is merged or appended.
//! - In-memory state is never touched, on success or failure.

use super::NoteStore;
use crate::source::DurableSource;
use log::{error, info};
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Why a persist call did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistFailureKind {
    /// Store could not be serialized.
    Encode,
    /// Durable source rejected the write.
    Write,
}

/// Outcome of one persist call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistReport {
    Written { notes: usize, bytes: usize },
    Failed {
        kind: PersistFailureKind,
        message: String,
    },
}

impl PersistReport {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

impl Display for PersistReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Written { notes, bytes } => write!(f, "wrote {notes} note(s), {bytes} byte(s)"),
            Self::Failed { kind, message } => {
                let kind = match kind {
                    PersistFailureKind::Encode => "encode",
                    PersistFailureKind::Write => "write",
                };
                write!(f, "persist {kind} failed: {message}")
            }
        }
    }
}

/// Overwrites the durable document with the store's full current state.
///
/// # Side effects
/// - Replaces durable contents on success.
/// - Emits `store_persist` logging events with duration and status.
pub fn persist(durable: &dyn DurableSource, store: &NoteStore) -> PersistReport {
    let started_at = Instant::now();
    info!(
        "event=store_persist module=persist status=start target={} count={}",
        durable.describe(),
        store.len()
    );

    let bytes = match serde_json::to_vec(store.notes()) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(
                "event=store_persist module=persist status=error error_code=encode_failed duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return PersistReport::Failed {
                kind: PersistFailureKind::Encode,
                message: err.to_string(),
            };
        }
    };

    match durable.write(&bytes) {
        Ok(()) => {
            info!(
                "event=store_persist module=persist status=ok count={} bytes={} duration_ms={}",
                store.len(),
                bytes.len(),
                started_at.elapsed().as_millis()
            );
            PersistReport::Written {
                notes: store.len(),
                bytes: bytes.len(),
            }
        }
        Err(err) => {
            error!(
                "event=store_persist module=persist status=error error_code=write_failed target={} duration_ms={} error={}",
                durable.describe(),
                started_at.elapsed().as_millis(),
                err
            );
            PersistReport::Failed {
                kind: PersistFailureKind::Write,
                message: err.to_string(),
            }
        }
    }
}
