use crate::generation::GenerationStatus;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Client input failed validation. The message is shown to the caller
    /// verbatim.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Generation {id} already finished with status {status}")]
    AlreadyFinished {
        id: String,
        status: GenerationStatus,
    },
}
