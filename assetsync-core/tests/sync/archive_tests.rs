//! Tests for archive extraction
//!
//! Scenarios:
//! - Round-trip extraction of directories and files
//! - Stored-order dependence (directories before their files)
//! - Path traversal rejection

use std::fs;

use assetsync_core::{archive, ExtractError};
use tempfile::TempDir;

use crate::common::build_archive;

#[test]
fn test_roundtrip_extraction() {
    let temp = TempDir::new().unwrap();
    let bytes = build_archive(&[
        ("data/", None),
        ("data/a.bin", Some(&[0xde, 0xad, 0xbe, 0xef])),
    ]);

    let archive_path = temp.path().join("assets.zip");
    fs::write(&archive_path, bytes).unwrap();

    let dest = temp.path().join("cache");
    fs::create_dir_all(&dest).unwrap();
    archive::extract(&archive_path, &dest).unwrap();

    assert!(dest.join("data").is_dir());
    assert_eq!(
        fs::read(dest.join("data/a.bin")).unwrap(),
        vec![0xde, 0xad, 0xbe, 0xef]
    );
}

#[test]
fn test_extraction_preserves_stored_order() {
    let temp = TempDir::new().unwrap();
    let bytes = build_archive(&[
        ("models/", None),
        ("models/player.dat", Some(b"player")),
        ("models/npcs/", None),
        ("models/npcs/guard.dat", Some(b"guard")),
    ]);

    let archive_path = temp.path().join("assets.zip");
    fs::write(&archive_path, bytes).unwrap();

    archive::extract(&archive_path, temp.path()).unwrap();

    assert_eq!(fs::read(temp.path().join("models/player.dat")).unwrap(), b"player");
    assert_eq!(
        fs::read(temp.path().join("models/npcs/guard.dat")).unwrap(),
        b"guard"
    );
}

#[test]
fn test_file_entry_without_directory_entry() {
    // Some archives omit directory records entirely
    let temp = TempDir::new().unwrap();
    let bytes = build_archive(&[("deep/nested/file.txt", Some(b"contents"))]);

    let archive_path = temp.path().join("assets.zip");
    fs::write(&archive_path, bytes).unwrap();

    archive::extract(&archive_path, temp.path()).unwrap();
    assert_eq!(
        fs::read(temp.path().join("deep/nested/file.txt")).unwrap(),
        b"contents"
    );
}

#[test]
fn test_entry_escaping_root_is_rejected() {
    let temp = TempDir::new().unwrap();
    let bytes = build_archive(&[("../escape.txt", Some(b"outside"))]);

    let archive_path = temp.path().join("assets.zip");
    fs::write(&archive_path, bytes).unwrap();

    let dest = temp.path().join("cache");
    fs::create_dir_all(&dest).unwrap();

    let result = archive::extract(&archive_path, &dest);
    assert!(matches!(result, Err(ExtractError::UnsafePath { .. })));

    // Nothing must land outside the destination root
    assert!(!temp.path().join("escape.txt").exists());
}

#[test]
fn test_empty_archive_extracts_to_nothing() {
    let temp = TempDir::new().unwrap();
    let bytes = build_archive(&[]);

    let archive_path = temp.path().join("assets.zip");
    fs::write(&archive_path, bytes).unwrap();

    let dest = temp.path().join("cache");
    fs::create_dir_all(&dest).unwrap();
    archive::extract(&archive_path, &dest).unwrap();

    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn test_malformed_archive_is_an_extraction_error() {
    let temp = TempDir::new().unwrap();
    let archive_path = temp.path().join("assets.zip");
    fs::write(&archive_path, b"definitely not a zip").unwrap();

    let result = archive::extract(&archive_path, temp.path());
    assert!(matches!(result, Err(ExtractError::Archive(_))));
}
