use reelgen_store::StoreError;

/// Errors raised by the studio outside of a generation session.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// No history entry has the requested id.
    #[error("No history entry with id '{0}'")]
    EntryNotFound(String),

    /// The HTTP request itself failed.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Download failed: {status} {reason}")]
    DownloadStatus { status: u16, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
