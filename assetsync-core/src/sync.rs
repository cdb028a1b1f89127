//! Cache synchronizer - orchestrates one synchronization run
//!
//! Drives decide → fetch → extract → commit → cleanup in a strict line.
//! The revision marker only advances after the archive is fully extracted,
//! so an interrupted run leaves the previous marker (or its absence) in
//! place and the next run starts over from the fetch rather than trusting
//! a half-installed cache.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

use crate::archive::{self, ExtractError};
use crate::config::SyncConfig;
#[cfg(feature = "http")]
use crate::fetcher::HttpFetcher;
use crate::fetcher::{FetchError, RemoteSource};
use crate::version::{MarkerError, VersionStore};

/// Revision marker file name under the cache root
pub const MARKER_FILE: &str = "version.dat";

/// Transient archive file name under the cache root
pub const ARCHIVE_FILE: &str = "assets.zip";

/// Fetch copy-loop buffer size
const CHUNK_SIZE: usize = 8 * 1024;

/// Result of a successful synchronization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Installed revision already matched the target; nothing was fetched
    UpToDate,
    /// A fresh copy of the assets was downloaded and installed
    Synchronized,
}

/// Brings the cache root up to the configured target revision
///
/// One synchronizer serves one cache root. Runs are strictly sequential;
/// callers that might overlap invocations must serialize them externally,
/// as two concurrent runs would race on the archive and marker files.
pub struct CacheSynchronizer {
    config: SyncConfig,
    store: VersionStore,
    source: Box<dyn RemoteSource>,
}

impl CacheSynchronizer {
    /// Create a synchronizer fetching over HTTP
    #[cfg(feature = "http")]
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        let source = HttpFetcher::new(&config)?;
        Ok(Self::with_source(config, Box::new(source)))
    }

    /// Create a synchronizer with an injected byte source
    pub fn with_source(config: SyncConfig, source: Box<dyn RemoteSource>) -> Self {
        let store = VersionStore::new(config.cache_dir.join(MARKER_FILE));
        Self {
            config,
            store,
            source,
        }
    }

    /// Bring the cache up to the target revision
    ///
    /// When the installed revision already matches, returns
    /// [`SyncOutcome::UpToDate`] without any network activity. Otherwise
    /// fetches the archive, extracts it into the cache root, records the
    /// new revision and removes the downloaded archive.
    ///
    /// `on_progress` receives a percentage and a short human-readable label
    /// after each downloaded chunk. When the transport cannot report a total
    /// length, a single indeterminate `(0, ..)` call is made at stream start
    /// and per-chunk percentages are skipped.
    ///
    /// On failure the run aborts immediately; the downloaded archive and
    /// any partially extracted files stay on disk for diagnostics, and the
    /// marker keeps its prior value so the next run retries from scratch.
    pub fn synchronize(
        &self,
        mut on_progress: impl FnMut(u32, &str),
    ) -> Result<SyncOutcome, SyncError> {
        // A freshly created root is synchronized like any stale cache;
        // there is nothing usable in it yet.
        fs::create_dir_all(&self.config.cache_dir).map_err(SyncError::Directory)?;

        if let Some(revision) = self.store.read()? {
            if revision == self.config.target_revision {
                return Ok(SyncOutcome::UpToDate);
            }
        }

        let archive_path = self.config.cache_dir.join(ARCHIVE_FILE);
        self.fetch(&archive_path, &mut on_progress)?;
        archive::extract(&archive_path, &self.config.cache_dir)?;
        self.store.write(self.config.target_revision)?;

        // Best effort: a leftover archive only costs disk space
        let _ = fs::remove_file(&archive_path);

        Ok(SyncOutcome::Synchronized)
    }

    /// Installed revision as currently recorded on disk
    pub fn installed_revision(&self) -> Result<Option<u8>, SyncError> {
        Ok(self.store.read()?)
    }

    /// Get the configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Stream the published archive into `archive_path`
    ///
    /// Strict turn-taking: one chunk is read from the network, written to
    /// disk and reported before the next chunk is requested.
    fn fetch(
        &self,
        archive_path: &Path,
        on_progress: &mut impl FnMut(u32, &str),
    ) -> Result<(), SyncError> {
        let remote = self.source.open(&self.config.archive_url)?;
        let mut reader = remote.reader;
        let mut output = fs::File::create(archive_path).map_err(SyncError::Disk)?;

        if remote.total_len.is_none() {
            on_progress(0, "Downloading assets");
        }

        let mut buffer = [0u8; CHUNK_SIZE];
        let mut downloaded: u64 = 0;
        loop {
            let read = reader
                .read(&mut buffer)
                .map_err(|e| FetchError::Connection(e.to_string()))?;
            if read == 0 {
                break;
            }

            output.write_all(&buffer[..read]).map_err(SyncError::Disk)?;
            downloaded += read as u64;

            if let Some(total) = remote.total_len {
                let percent = ((downloaded * 100 / total.max(1)) as u32).min(100);
                on_progress(percent, &format!("Downloading assets {percent}%"));
            }
        }

        output.flush().map_err(SyncError::Disk)?;
        Ok(())
    }
}

/// Errors that can abort a synchronization run
#[derive(Debug, Error)]
pub enum SyncError {
    /// Cache root could not be created
    #[error("cache root could not be created: {0}")]
    Directory(#[source] io::Error),

    /// Connection open or read failure
    #[error("network error: {0}")]
    Network(#[from] FetchError),

    /// Write/flush failure on the downloaded archive
    #[error("disk error: {0}")]
    Disk(#[source] io::Error),

    /// Extraction failed; the archive and partial output stay on disk
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Revision marker could not be read or persisted
    #[error("marker error: {0}")]
    Marker(#[from] MarkerError),
}
