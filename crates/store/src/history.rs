//! Generation history persisted under a single key.

use std::sync::{Mutex, PoisonError};

use reelgen_core::generation::GenerationRecord;
use reelgen_core::history::{HistoryEntry, HistoryQuery};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Key holding the JSON-encoded history array.
pub const STORAGE_KEY: &str = "video_generation_history";

/// Ordered, id-unique list of completed generations, newest first.
///
/// Mutations are read-modify-write on the whole array and are serialised by
/// an internal lock.
pub struct HistoryStore<S> {
    kv: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// The backing key-value store.
    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// Persist a completed generation at the front of the list.
    ///
    /// Records that are not completed or have no video URL are ignored and
    /// `Ok(false)` is returned. An existing entry with the same id is
    /// replaced rather than duplicated.
    pub fn save(&self, record: &GenerationRecord) -> Result<bool, StoreError> {
        let Some(entry) = HistoryEntry::from_record(record) else {
            tracing::debug!(id = %record.id, status = %record.status, "Skipping history save");
            return Ok(false);
        };

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.list();
        entries.retain(|existing| existing.id != entry.id);
        entries.insert(0, entry);
        self.write(&entries)?;

        tracing::info!(id = %record.id, total = entries.len(), "Saved generation to history");
        Ok(true)
    }

    /// All stored entries, or an empty list if nothing is stored or the
    /// stored value cannot be read.
    ///
    /// Read failures are logged, not returned. Use [`Self::try_list`] to
    /// observe them.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.try_list().unwrap_or_else(|e| {
            tracing::warn!(key = STORAGE_KEY, error = %e, "Ignoring unreadable history");
            Vec::new()
        })
    }

    /// All stored entries, surfacing read and parse failures.
    pub fn try_list(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        match self.kv.get(STORAGE_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: STORAGE_KEY.to_string(),
                source,
            }),
        }
    }

    /// Entries matching `query`, in its requested order.
    pub fn query(&self, query: &HistoryQuery) -> Vec<HistoryEntry> {
        query.apply(&self.list())
    }

    pub fn get(&self, id: &str) -> Option<HistoryEntry> {
        self.list().into_iter().find(|entry| entry.id == id)
    }

    /// Remove the entry with `id`. Returns whether an entry was removed.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.list();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;
        self.write(&entries)?;

        if removed {
            tracing::info!(id, "Removed generation from history");
        }
        Ok(removed)
    }

    /// Delete the whole history.
    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.kv.remove(STORAGE_KEY)?;
        tracing::info!("Cleared generation history");
        Ok(())
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(entries)?;
        self.kv.set(STORAGE_KEY, &encoded)
    }
}
