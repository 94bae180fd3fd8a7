//! Three-tier note collection loader.
//!
//! # Responsibility
//! - Resolve the startup collection from durable file, then seed, then empty.
//! - Absorb every load-path failure into the fallback chain.
//!
//! # Invariants
//! - A missing durable document is not a failure; it silently falls through.
//! - Undecodable or invalid documents fall through to the next tier.
//! - Loading never panics and never returns an error.

use super::NoteStore;
use crate::model::note::Note;
use crate::source::{DurableSource, SeedSource};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Tier that produced the loaded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Durable,
    Seed,
    Empty,
}

impl LoadOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Seed => "seed",
            Self::Empty => "empty",
        }
    }
}

/// Source tier a load failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTier {
    Durable,
    Seed,
}

impl LoadTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Seed => "seed",
        }
    }
}

/// Why one tier did not yield a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    /// Source reported that nothing exists.
    SourceUnavailable,
    /// Source exists but could not be read.
    Read,
    /// Bytes are not a JSON array of notes.
    Decode,
    /// Decoded notes break model invariants.
    Invalid,
}

/// One absorbed load-path failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub tier: LoadTier,
    pub kind: LoadFailureKind,
    pub message: String,
}

impl Display for LoadFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            LoadFailureKind::SourceUnavailable => "source unavailable",
            LoadFailureKind::Read => "read failed",
            LoadFailureKind::Decode => "decode failed",
            LoadFailureKind::Invalid => "invalid note",
        };
        write!(f, "{} {kind}: {}", self.tier.as_str(), self.message)
    }
}

impl Error for LoadFailure {}

/// Result of one loader run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub notes: Vec<Note>,
    pub origin: LoadOrigin,
    /// Failures absorbed on the way, in tier order.
    pub failures: Vec<LoadFailure>,
}

/// Resolves the startup collection.
///
/// # Side effects
/// - Reads the durable source, and the seed source only when needed.
/// - Emits `store_load` logging events with origin and duration.
pub fn load_notes(durable: &dyn DurableSource, seed: &dyn SeedSource) -> LoadOutcome {
    let started_at = Instant::now();
    let mut failures = Vec::new();
    info!(
        "event=store_load module=loader status=start durable={}",
        durable.describe()
    );

    let (notes, origin) = match read_durable(durable) {
        Ok(notes) => (notes, LoadOrigin::Durable),
        Err(failure) => {
            log_fallback(&failure, durable.describe());
            failures.push(failure);
            match read_seed(seed) {
                Ok(notes) => (notes, LoadOrigin::Seed),
                Err(failure) => {
                    log_fallback(&failure, seed.describe());
                    failures.push(failure);
                    (Vec::new(), LoadOrigin::Empty)
                }
            }
        }
    };

    info!(
        "event=store_load module=loader status=ok origin={} count={} duration_ms={}",
        origin.as_str(),
        notes.len(),
        started_at.elapsed().as_millis()
    );
    LoadOutcome {
        notes,
        origin,
        failures,
    }
}

fn log_fallback(failure: &LoadFailure, source: String) {
    match (failure.tier, failure.kind) {
        (LoadTier::Durable, LoadFailureKind::SourceUnavailable) => info!(
            "event=store_load module=loader status=fallback tier={} reason=not_found",
            failure.tier.as_str()
        ),
        (LoadTier::Durable, _) => warn!(
            "event=store_load module=loader status=fallback tier={} source={} error={}",
            failure.tier.as_str(),
            source,
            failure
        ),
        // Seed is expected well-formed in every build.
        (LoadTier::Seed, _) => error!(
            "event=store_load module=loader status=fallback tier={} error_code=seed_unusable source={} error={}",
            failure.tier.as_str(),
            source,
            failure
        ),
    }
}

impl NoteStore {
    /// Builds a store from the three-tier loader.
    pub fn load(durable: &dyn DurableSource, seed: &dyn SeedSource) -> (Self, LoadOrigin) {
        let outcome = load_notes(durable, seed);
        (Self::from_loaded(outcome.notes), outcome.origin)
    }

    /// Wraps notes that already passed loader validation.
    pub(super) fn from_loaded(notes: Vec<Note>) -> Self {
        Self {
            notes,
            clock: Default::default(),
        }
    }
}

fn read_durable(durable: &dyn DurableSource) -> Result<Vec<Note>, LoadFailure> {
    let failure = |kind, message: String| LoadFailure {
        tier: LoadTier::Durable,
        kind,
        message,
    };

    let bytes = durable
        .read()
        .map_err(|err| failure(LoadFailureKind::Read, err.to_string()))?
        .ok_or_else(|| failure(LoadFailureKind::SourceUnavailable, durable.describe()))?;
    decode_notes(&bytes).map_err(|(kind, message)| failure(kind, message))
}

fn read_seed(seed: &dyn SeedSource) -> Result<Vec<Note>, LoadFailure> {
    let failure = |kind, message: String| LoadFailure {
        tier: LoadTier::Seed,
        kind,
        message,
    };

    let bytes = seed.read().map_err(|err| {
        let kind = if err.kind() == std::io::ErrorKind::NotFound {
            LoadFailureKind::SourceUnavailable
        } else {
            LoadFailureKind::Read
        };
        failure(kind, err.to_string())
    })?;
    decode_notes(&bytes).map_err(|(kind, message)| failure(kind, message))
}

/// Decodes and validates one JSON document of notes.
fn decode_notes(bytes: &[u8]) -> Result<Vec<Note>, (LoadFailureKind, String)> {
    let notes: Vec<Note> = serde_json::from_slice(bytes)
        .map_err(|err| (LoadFailureKind::Decode, err.to_string()))?;
    for (index, note) in notes.iter().enumerate() {
        note.validate()
            .map_err(|err| (LoadFailureKind::Invalid, format!("note #{index}: {err}")))?;
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, LoadFailure, LoadFailureKind, LoadOrigin, LoadTier};

    #[test]
    fn labels_match_log_vocabulary() {
        assert_eq!(LoadOrigin::Durable.as_str(), "durable");
        assert_eq!(LoadOrigin::Seed.as_str(), "seed");
        assert_eq!(LoadOrigin::Empty.as_str(), "empty");
        let failure = LoadFailure {
            tier: LoadTier::Seed,
            kind: LoadFailureKind::Decode,
            message: "eof".to_string(),
        };
        assert_eq!(failure.to_string(), "seed decode failed: eof");
    }

    #[test]
    fn decode_rejects_null_and_empty_documents() {
        assert_eq!(decode_notes(b"null").unwrap_err().0, LoadFailureKind::Decode);
        assert_eq!(decode_notes(b"").unwrap_err().0, LoadFailureKind::Decode);
    }

    #[test]
    fn decode_accepts_empty_array() {
        assert!(decode_notes(b"[]").unwrap().is_empty());
    }

    #[test]
    fn decode_flags_reversed_timestamps_as_invalid() {
        let raw = br#"[{"id":"x","title":"","body":"","dateCreated":5,"lastModified":4}]"#;
        let (kind, message) = decode_notes(raw).unwrap_err();
        assert_eq!(kind, LoadFailureKind::Invalid);
        assert!(message.contains("note #0"));
    }
}
