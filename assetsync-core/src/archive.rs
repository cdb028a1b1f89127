// SPDX-FileCopyrightText: 2026 Assetsync Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Archive extraction into the cache root
//!
//! Entries are processed strictly in their stored order so directory
//! entries land before the files inside them; extraction is a single
//! sequential pass with no re-ordering or parallelism. A failed entry
//! aborts the pass. Already-written output is not rolled back: the next
//! full synchronization run overwrites it.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

use zip::result::ZipError;
use zip::ZipArchive;

/// Extract every entry of `archive` under `destination`
///
/// On success every archive entry has a corresponding path under
/// `destination` with the matching kind and, for files, identical bytes.
pub fn extract(archive: &Path, destination: &Path) -> Result<(), ExtractError> {
    let file = fs::File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;

        let relative = entry.enclosed_name().ok_or_else(|| ExtractError::UnsafePath {
            name: entry.name().to_string(),
        })?;
        let target = destination.join(relative);

        if entry.is_dir() {
            // No-op when the directory already exists
            fs::create_dir_all(&target)?;
            continue;
        }

        // Some archives omit directory entries for the files they contain
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output = fs::File::create(&target)?;
        io::copy(&mut entry, &mut output)?;
        output.flush()?;
    }

    Ok(())
}

/// Errors that can occur during extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Archive stream is malformed
    #[error("malformed archive: {0}")]
    Archive(#[from] ZipError),

    /// Entry path would escape the destination root
    #[error("entry {name:?} escapes the destination root")]
    UnsafePath {
        /// Stored name of the offending entry
        name: String,
    },

    /// An entry could not be written to disk
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
