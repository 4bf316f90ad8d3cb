use thiserror::Error;

/// Library-wide error type, consolidating all internal failure kinds into a single enum.
///
/// None of these variants cross the public API boundary as a panic or a thrown
/// error: the pipeline recovers every failure to a safe default and reports it
/// through the `on_error` observer hook. The enum is `Clone` so an error can be
/// recorded in the execution state and surfaced to callbacks at the same time.
#[derive(Debug, Error, Clone)]
pub enum CoreError {
    /// Represents an internal failure while classifying a response pattern.
    #[error("Classification error: {0}")]
    Classification(String),

    /// Represents a voice playback failure reported by the audio channel.
    #[error("Voice playback error: {0}")]
    Voice(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents configuration-related errors (e.g., invalid profile data).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::time::error::Elapsed> for CoreError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        CoreError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Config(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        CoreError::Config(format!("Validation errors: {}", err))
    }
}
