//! String key-value backends.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use reelgen_core::types::sanitize_file_stem;

use crate::error::StoreError;

/// Minimal key-value capability, shaped like browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local store, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed
// ---------------------------------------------------------------------------

/// One file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written value.
#[derive(Debug)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`. Characters outside `[A-Za-z0-9_-]`
    /// are replaced so a key can never escape the root directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_file_stem(key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_keys_stay_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        let path = store.path_for("../../etc/passwd");
        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(path.file_name().unwrap(), "______etc_passwd.json");
    }

    #[test]
    fn file_store_round_trips_and_tolerates_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("nested")).unwrap();
        assert_eq!(store.get("history").unwrap(), None);
        store.remove("history").unwrap();

        store.set("history", "[1,2,3]").unwrap();
        assert_eq!(store.get("history").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(!store.path_for("history").with_extension("json.tmp").exists());
    }
}
