use thiserror::Error;

/// Conditions that cross the parser boundary.
///
/// Malformed rows are not errors; they are dropped inside the engine. Only
/// failures of the line source itself and cancellation reach the caller.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse cancelled")]
    Cancelled,
}

impl IngestError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, IngestError::Cancelled)
    }
}

// Convenience type alias
pub type IngestResult<T> = Result<T, IngestError>;
