//! Configuration for cache synchronization

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the cache synchronizer
///
/// Constructed once at startup by the host application and handed to
/// [`crate::CacheSynchronizer`]; nothing in here is global state.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Cache root directory holding the installed assets and the marker file
    pub cache_dir: PathBuf,

    /// Direct URL of the published asset archive
    pub archive_url: String,

    /// Revision the cache must match after a successful run
    pub target_revision: u8,

    /// HTTP timeout for the archive fetch
    pub timeout: Duration,

    /// User agent sent with the fetch request
    pub user_agent: String,

    /// Proxy URL (e.g. "socks5://127.0.0.1:9050")
    pub proxy_url: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("."),
            archive_url: String::new(),
            target_revision: 1,
            timeout: Duration::from_secs(30),
            user_agent: format!("Assetsync/{}", env!("CARGO_PKG_VERSION")),
            proxy_url: None,
        }
    }
}

impl SyncConfig {
    /// Create a config for the given cache root and archive URL
    pub fn new(cache_dir: impl Into<PathBuf>, archive_url: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            archive_url: archive_url.into(),
            ..Self::default()
        }
    }

    /// Set the revision the cache must match
    ///
    /// Bumping this constant in the host application forces every client to
    /// re-synchronize on its next run.
    pub fn with_target_revision(mut self, revision: u8) -> Self {
        self.target_revision = revision;
        self
    }

    /// Set the HTTP timeout for the fetch
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route the fetch through a proxy
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        self.proxy_url = Some(proxy_url);
        self
    }
}
