/// Errors surfaced by a [`VideoBackend`](crate::backend::VideoBackend).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// Submitting the generation failed. Carries the underlying message.
    #[error("{0}")]
    GenerationFailed(String),

    /// Fetching a generation's status failed.
    #[error("{0}")]
    StatusCheckFailed(String),
}

impl ClientError {
    /// Machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::GenerationFailed(_) => "GENERATION_FAILED",
            ClientError::StatusCheckFailed(_) => "STATUS_CHECK_FAILED",
        }
    }
}
