// SPDX-FileCopyrightText: 2026 Assetsync Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Revision marker persistence
//!
//! The marker is a single byte at a fixed path under the cache root. A
//! missing file means no revision is installed, which the synchronizer
//! treats the same as a stale one. Writes go through a temp file and a
//! rename so the marker is never observable half-written.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reads and writes the installed-revision marker
///
/// The only component allowed to touch the marker file. Integrity of the
/// value itself (checksums, signatures) is out of scope; the marker is an
/// opaque one-byte stamp.
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    /// Create a store for the marker file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the installed revision
    ///
    /// Returns `Ok(None)` when the marker file does not exist; that is a
    /// normal state (fresh install), not an error.
    pub fn read(&self) -> Result<Option<u8>, MarkerError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(MarkerError::Io(e)),
        };

        match data.first() {
            Some(&revision) => Ok(Some(revision)),
            None => Err(MarkerError::Malformed),
        }
    }

    /// Persist `revision`, replacing any prior value
    ///
    /// Written to a temp file, flushed, then renamed into place: a crash
    /// mid-write leaves the previous marker (or its absence) intact.
    pub fn write(&self, revision: u8) -> Result<(), MarkerError> {
        let temp_path = self.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&[revision])?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Path of the marker file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Errors that can occur reading or writing the revision marker
#[derive(Debug, Error)]
pub enum MarkerError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Marker file exists but holds no revision byte
    #[error("marker file is empty")]
    Malformed,
}
