//! Local persistence for generation history.
//!
//! History lives in a key-value store under a single fixed key, holding a
//! JSON array of [`HistoryEntry`](reelgen_core::history::HistoryEntry). The
//! store is an injected [`KeyValueStore`] so callers can swap the backing
//! medium without touching the history logic.

pub mod error;
pub mod history;
pub mod kv;

pub use error::StoreError;
pub use history::{HistoryStore, STORAGE_KEY};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
