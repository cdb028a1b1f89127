//! Tests for synchronizer configuration

use std::time::Duration;

use assetsync_core::SyncConfig;

#[test]
fn test_default_config() {
    let config = SyncConfig::default();

    assert_eq!(config.target_revision, 1);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.proxy_url.is_none());
    assert!(config.user_agent.starts_with("Assetsync/"));
}

#[test]
fn test_new_sets_root_and_url() {
    let config = SyncConfig::new("/tmp/cache", "http://assets.example/assets.zip");

    assert_eq!(config.cache_dir.to_str(), Some("/tmp/cache"));
    assert_eq!(config.archive_url, "http://assets.example/assets.zip");
}

#[test]
fn test_builder_methods() {
    let config = SyncConfig::new("/tmp/cache", "http://assets.example/assets.zip")
        .with_target_revision(9)
        .with_timeout(Duration::from_secs(5))
        .with_proxy("socks5://127.0.0.1:9050".to_string());

    assert_eq!(config.target_revision, 9);
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.proxy_url.as_deref(), Some("socks5://127.0.0.1:9050"));
}
