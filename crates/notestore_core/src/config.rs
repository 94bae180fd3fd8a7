//! Runtime configuration for one note store installation.
//!
//! # Responsibility
//! - Resolve where the durable file lives and which seed to use.
//! - Read overrides from `NOTESTORE_*` environment variables.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Without a seed override the bundled `golden` seed is used.

use crate::logging::default_log_level;
use crate::source::{BundledSeed, FileDurableSource, FileSeedSource, SeedSource};
use crate::store::NoteClock;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "NOTESTORE_DATA_DIR";
pub const ENV_SEED_PATH: &str = "NOTESTORE_SEED_PATH";
pub const ENV_LOG_LEVEL: &str = "NOTESTORE_LOG_LEVEL";
pub const ENV_CLOCK: &str = "NOTESTORE_CLOCK";

/// File name of the durable notes document.
pub const DEFAULT_NOTES_FILE: &str = "notes.json";
const DEFAULT_DATA_DIR_NAME: &str = "notestore";

/// Configuration override that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Clock value outside `zero|wall`.
    InvalidClock { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidClock { key, value } => {
                write!(f, "unknown clock `{value}` in {key}; expected zero|wall")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Private per-installation directory holding the durable file.
    pub data_dir: PathBuf,
    /// Durable file name inside `data_dir`.
    pub file_name: String,
    /// Seed file override; `None` means the bundled seed.
    pub seed_path: Option<PathBuf>,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Timestamp source for new notes.
    pub clock: NoteClock,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME),
            file_name: DEFAULT_NOTES_FILE.to_string(),
            seed_path: None,
            log_level: default_log_level().to_string(),
            clock: NoteClock::default(),
        }
    }
}

impl StoreConfig {
    /// Builds configuration from defaults plus environment overrides.
    ///
    /// # Errors
    /// - Returns `ConfigError::InvalidClock` for an unknown `NOTESTORE_CLOCK`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from defaults plus overrides served by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(dir) = read(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read(ENV_SEED_PATH) {
            config.seed_path = Some(PathBuf::from(seed));
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(clock) = read(ENV_CLOCK) {
            config.clock = parse_clock(&clock).ok_or_else(|| {
                warn!(
                    "event=config_load module=config status=error error_code=invalid_clock key={}",
                    ENV_CLOCK
                );
                ConfigError::InvalidClock {
                    key: ENV_CLOCK,
                    value: clock.clone(),
                }
            })?;
        }
        Ok(config)
    }

    /// Full path of the durable notes file.
    pub fn durable_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    pub fn durable_source(&self) -> FileDurableSource {
        FileDurableSource::new(self.durable_path())
    }

    /// Seed override file, or the bundled seed.
    pub fn seed_source(&self) -> Box<dyn SeedSource> {
        match &self.seed_path {
            Some(path) => Box::new(FileSeedSource::new(path)),
            None => Box::new(BundledSeed),
        }
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Parses `zero|wall` into a clock mode.
pub fn parse_clock(value: &str) -> Option<NoteClock> {
    match value.trim().to_ascii_lowercase().as_str() {
        "zero" => Some(NoteClock::Zero),
        "wall" | "wall_millis" => Some(NoteClock::WallMillis),
        _ => None,
    }
}
