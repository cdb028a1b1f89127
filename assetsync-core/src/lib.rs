// SPDX-FileCopyrightText: 2026 Assetsync Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Assetsync Core Library
//!
//! Keeps a local directory of game assets in step with a published revision.
//! One synchronization run compares the installed revision marker against the
//! target, downloads the published archive when the cache is stale or absent,
//! extracts it into the cache root and records the new revision atomically.
//!
//! The crate has no user interface of its own: a host application invokes
//! [`CacheSynchronizer::synchronize`] during startup and renders the progress
//! callback however it sees fit.

pub mod archive;
pub mod config;
pub mod fetcher;
pub mod sync;
pub mod version;

pub use archive::ExtractError;
pub use config::SyncConfig;
#[cfg(feature = "http")]
pub use fetcher::HttpFetcher;
pub use fetcher::{FetchError, MockSource, RemoteArchive, RemoteSource};
pub use sync::{CacheSynchronizer, SyncError, SyncOutcome, ARCHIVE_FILE, MARKER_FILE};
pub use version::{MarkerError, VersionStore};
