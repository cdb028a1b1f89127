// SPDX-FileCopyrightText: 2026 Assetsync Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote archive retrieval
//!
//! Platform-agnostic abstraction over the archive byte source. The
//! synchronizer only needs a blocking stream and, when the transport can
//! report one, a total length for percentage calculation. [`HttpFetcher`]
//! is the production implementation; [`MockSource`] serves canned bytes
//! for tests and for hosts that bring their own transport.

use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "http")]
use crate::config::SyncConfig;

/// An opened remote archive
pub struct RemoteArchive {
    /// Blocking byte stream for the archive body
    pub reader: Box<dyn Read>,
    /// Total body length, when the transport reports one
    pub total_len: Option<u64>,
}

/// Capability to open the published archive as a byte stream
///
/// Implementations must hand back a fresh stream on every call; the
/// synchronizer opens at most one per run and reads it to the end.
pub trait RemoteSource {
    /// Open a connection to `url` and return the body stream
    fn open(&self, url: &str) -> Result<RemoteArchive, FetchError>;
}

/// Fetches the archive over HTTP
#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Build a fetcher from the synchronizer configuration
    pub fn new(config: &SyncConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());

        // Support proxy if configured
        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[cfg(feature = "http")]
impl RemoteSource for HttpFetcher {
    fn open(&self, url: &str) -> Result<RemoteArchive, FetchError> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let total_len = response.content_length();
        Ok(RemoteArchive {
            reader: Box::new(response),
            total_len,
        })
    }
}

/// In-memory source for tests
///
/// Serves a fixed body, optionally in bounded chunks so the copy loop
/// observes more than one read, and counts how often it was opened.
pub struct MockSource {
    body: Vec<u8>,
    chunk_limit: usize,
    report_len: bool,
    fail: bool,
    opens: Arc<AtomicUsize>,
}

impl MockSource {
    /// Create a source serving `body`
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            chunk_limit: usize::MAX,
            report_len: true,
            fail: false,
            opens: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a source whose `open()` always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Cap how many bytes a single `read()` can return
    pub fn with_chunk_limit(mut self, limit: usize) -> Self {
        self.chunk_limit = limit;
        self
    }

    /// Pretend the transport cannot report a total length
    pub fn without_length(mut self) -> Self {
        self.report_len = false;
        self
    }

    /// Shared counter of `open()` calls, for asserting fetch behavior
    pub fn open_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.opens)
    }
}

impl RemoteSource for MockSource {
    fn open(&self, _url: &str) -> Result<RemoteArchive, FetchError> {
        self.opens.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(FetchError::Connection(
                "mock source configured to fail".to_string(),
            ));
        }

        let reader = ChunkedReader {
            inner: Cursor::new(self.body.clone()),
            limit: self.chunk_limit,
        };
        let total_len = self.report_len.then(|| self.body.len() as u64);

        Ok(RemoteArchive {
            reader: Box::new(reader),
            total_len,
        })
    }
}

/// Caps each `read()` at `limit` bytes
struct ChunkedReader {
    inner: Cursor<Vec<u8>>,
    limit: usize,
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let cap = buf.len().min(self.limit);
        self.inner.read(&mut buf[..cap])
    }
}

/// Errors that can occur opening or reading the remote archive
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection could not be opened or the body stream failed mid-read
    #[error("connection failed: {0}")]
    Connection(String),

    /// Server answered with a non-success status
    #[error("server answered HTTP {0}")]
    Status(u16),

    /// Transport-level HTTP error
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
