//! Shared test infrastructure.
//!
//! Every test gets its own `DocumentStore` in a fresh temporary directory.
//! Keep the returned `TempDir` alive for as long as the store is used.

#![allow(dead_code)]

use std::time::Duration;

use menil::models::poll::NewPoll;
use menil::store::DocumentStore;
use tempfile::TempDir;

pub const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// A store with every collection initialised to its default contents.
pub fn setup_store() -> (TempDir, DocumentStore) {
    setup_store_with_timeout(LOCK_TIMEOUT)
}

pub fn setup_store_with_timeout(timeout: Duration) -> (TempDir, DocumentStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = DocumentStore::open(dir.path(), timeout).expect("Failed to open store");
    store.init_collections().expect("Failed to init collections");
    (dir, store)
}

pub fn labels(options: &[&str]) -> Vec<String> {
    options.iter().map(|s| s.to_string()).collect()
}

pub fn draft(meeting_id: &str, options: &[&str], allow_multiple: bool) -> NewPoll {
    NewPoll {
        title: "Test poll".to_string(),
        description: String::new(),
        options: labels(options),
        allow_multiple,
        created_by: "chair".to_string(),
        meeting_id: meeting_id.to_string(),
    }
}
