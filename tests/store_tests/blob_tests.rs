//! Tests for blob stores
//!
//! These tests verify:
//! - Memory store get/set
//! - File store persistence across reopen
//! - Corruption detection (magic, CRC, truncation)
//! - Key validation

use std::fs;
use std::sync::Arc;

use leadtable::store::{BlobStore, FileBlobStore, MemoryBlobStore, HEADER_SIZE};
use leadtable::LeadError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_file_store() -> (TempDir, FileBlobStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileBlobStore::open(temp_dir.path()).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Memory Store Tests
// =============================================================================

#[test]
fn test_memory_get_missing() {
    let store = MemoryBlobStore::new();

    assert_eq!(store.get("leadsData").unwrap(), None);
    assert!(store.is_empty());
}

#[test]
fn test_memory_set_overwrites() {
    let store = MemoryBlobStore::new();

    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();

    assert_eq!(store.get("k").unwrap(), Some("two".to_string()));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_arc_store_shares_slots() {
    let store = Arc::new(MemoryBlobStore::new());
    let handle = Arc::clone(&store);

    handle.set("k", "v").unwrap();

    assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
}

// =============================================================================
// File Store Tests
// =============================================================================

#[test]
fn test_file_open_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("nested").join("data");

    let _store = FileBlobStore::open(&dir).unwrap();

    assert!(dir.is_dir());
}

#[test]
fn test_file_get_missing() {
    let (_temp, store) = setup_file_store();

    assert_eq!(store.get("leadsData").unwrap(), None);
}

#[test]
fn test_file_set_get_across_reopen() {
    let (temp, store) = setup_file_store();
    store.set("leadsData", "[{\"ID\":\"1\"}]").unwrap();
    drop(store);

    let reopened = FileBlobStore::open(temp.path()).unwrap();

    assert_eq!(
        reopened.get("leadsData").unwrap(),
        Some("[{\"ID\":\"1\"}]".to_string())
    );
}

#[test]
fn test_file_set_leaves_no_temp_file() {
    let (temp, store) = setup_file_store();
    store.set("leadsData", "[]").unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["leadsData.blob".to_string()]);
}

#[test]
fn test_file_detects_crc_corruption() {
    let (_temp, store) = setup_file_store();
    store.set("k", "hello world").unwrap();

    let path = store.blob_path("k").unwrap();
    let mut bytes = fs::read(&path).unwrap();
    bytes[HEADER_SIZE] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(store.get("k"), Err(LeadError::MalformedStoredData(_))));
}

#[test]
fn test_file_detects_bad_magic() {
    let (_temp, store) = setup_file_store();
    let path = store.blob_path("k").unwrap();
    fs::write(&path, b"not a blob file at all").unwrap();

    assert!(matches!(store.get("k"), Err(LeadError::MalformedStoredData(_))));
}

#[test]
fn test_file_detects_truncation() {
    let (_temp, store) = setup_file_store();
    store.set("k", "some payload").unwrap();

    let path = store.blob_path("k").unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    assert!(matches!(store.get("k"), Err(LeadError::MalformedStoredData(_))));

    fs::write(&path, &bytes[..4]).unwrap();
    assert!(matches!(store.get("k"), Err(LeadError::MalformedStoredData(_))));
}

#[test]
fn test_file_rejects_path_keys() {
    let (_temp, store) = setup_file_store();

    for key in ["", "..", "a/b", "a\\b"] {
        assert!(matches!(store.set(key, "x"), Err(LeadError::Config(_))), "key {:?}", key);
    }
}
