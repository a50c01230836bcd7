/// Errors from the local persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for storage.
    #[error("Failed to encode stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The stored value under `key` is not valid for its expected shape.
    #[error("Stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
