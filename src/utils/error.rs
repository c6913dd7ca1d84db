use thiserror::Error;

/// Errors for the crate's outer surface (file handling, serialization).
/// The extraction pipeline itself is total: malformed transcripts degrade
/// to empty fields and `errors` entries, never to an `Err`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
