//! File-backed sources.
//!
//! # Invariants
//! - Durable writes go through a sibling `*.tmp` file and a rename, so a
//!   reader never sees a half-written document.
//! - A missing durable file reads as `Ok(None)`.

use super::{DurableSource, SeedSource};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

const TEMP_SUFFIX: &str = "tmp";

/// Durable notes document stored at one file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDurableSource {
    path: PathBuf,
}

impl FileDurableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

impl DurableSource for FileDurableSource {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        let result = (|| -> io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Seed document read from a file instead of the bundled copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for FileSeedSource {
    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
