//! Local snapshot persistence.
//!
//! `KeyValueStore` handles the raw I/O (filesystem vs memory); `SnapshotStore`
//! knows which keys exist and how a document is encoded under them.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::document::Document;

pub const DOCUMENT_KEY: &str = "resumeData";
pub const ONBOARDING_KEY: &str = "hasSeenWelcomeModal";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Raw string storage by key.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Must be atomic: a reader never observes a partially written value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

// ────────────────────────────────────────────────────────────────────────────
// Filesystem backend
// ────────────────────────────────────────────────────────────────────────────

/// One `<key>.json` file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn io_err(key: &str) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
        move |source| PersistenceError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err(key)(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(Self::io_err(key))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root).map_err(Self::io_err(key))?;
        tmp.write_all(value.as_bytes()).map_err(Self::io_err(key))?;
        tmp.persist(self.path_for(key))
            .map_err(|e| Self::io_err(key)(e.error))?;
        debug!(key, bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(key)(e)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ────────────────────────────────────────────────────────────────────────────

/// In-memory backend for tests, with optional write failure simulation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory store poisoned".to_string()))
    }

    fn writes_fail(&self) -> bool {
        self.fail_writes.lock().map(|f| *f).unwrap_or(false)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.writes_fail() {
            return Err(PersistenceError::Unavailable("simulated write error".to_string()));
        }
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.writes_fail() {
            return Err(PersistenceError::Unavailable("simulated write error".to_string()));
        }
        self.entries()?.remove(key);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshot store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub key: String,
    pub bytes: usize,
    pub saved_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SnapshotStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SnapshotStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn save(&self, document: &Document) -> Result<SaveReceipt> {
        let raw = serde_json::to_string(document)?;
        self.backend.set(DOCUMENT_KEY, &raw)?;
        Ok(SaveReceipt {
            key: DOCUMENT_KEY.to_string(),
            bytes: raw.len(),
            saved_at: Utc::now(),
        })
    }

    /// The stored document, or `None` when absent, unreadable, or malformed.
    pub fn load(&self) -> Option<Document> {
        let raw = match self.backend.get(DOCUMENT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read saved document: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Saved document is malformed, ignoring it: {e}");
                None
            }
        }
    }

    pub fn seen_onboarding(&self) -> bool {
        matches!(self.backend.get(ONBOARDING_KEY), Ok(Some(v)) if v.trim() == "true")
    }

    pub fn mark_onboarding_seen(&self) -> Result<()> {
        self.backend.set(ONBOARDING_KEY, "true")
    }

    /// Removes both the document and the onboarding flag.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(DOCUMENT_KEY)?;
        self.backend.remove(ONBOARDING_KEY)
    }
}

/// Data directory helper used at startup.
pub fn fs_snapshots(root: &Path) -> SnapshotStore {
    SnapshotStore::new(Arc::new(FsStore::new(root)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn memory() -> (Arc<MemoryStore>, SnapshotStore) {
        let backend = Arc::new(MemoryStore::new());
        (backend.clone(), SnapshotStore::new(backend))
    }

    #[test]
    fn test_save_then_load_returns_equal_document() {
        let dir = tempdir().unwrap();
        let snapshots = fs_snapshots(dir.path());
        let mut doc = Document::default();
        doc.summary = "Saved summary".to_string();

        let receipt = snapshots.save(&doc).unwrap();
        assert_eq!(receipt.key, DOCUMENT_KEY);
        assert!(dir.path().join("resumeData.json").exists());
        assert_eq!(snapshots.load(), Some(doc));
    }

    #[test]
    fn test_load_without_snapshot_is_none() {
        let dir = tempdir().unwrap();
        assert!(fs_snapshots(dir.path()).load().is_none());
    }

    #[test]
    fn test_malformed_snapshot_loads_as_none() {
        let (backend, snapshots) = memory();
        backend.set(DOCUMENT_KEY, "{ not json").unwrap();
        assert!(snapshots.load().is_none());
    }

    #[test]
    fn test_onboarding_flag_round_trip_and_clear() {
        let dir = tempdir().unwrap();
        let snapshots = fs_snapshots(dir.path());
        assert!(!snapshots.seen_onboarding());
        snapshots.mark_onboarding_seen().unwrap();
        assert!(snapshots.seen_onboarding());
        snapshots.save(&Document::default()).unwrap();

        snapshots.clear().unwrap();
        assert!(!snapshots.seen_onboarding());
        assert!(snapshots.load().is_none());
    }

    #[test]
    fn test_clear_on_empty_store_succeeds() {
        let dir = tempdir().unwrap();
        assert!(fs_snapshots(&dir.path().join("never-created")).clear().is_ok());
    }

    #[test]
    fn test_write_failure_surfaces_as_error() {
        let (backend, snapshots) = memory();
        backend.set_fail_writes(true);
        let err = snapshots.save(&Document::default());
        assert!(matches!(err, Err(PersistenceError::Unavailable(_))));
    }
}
