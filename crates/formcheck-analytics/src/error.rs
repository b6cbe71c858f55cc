//! Error types for session analysis.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Conditions the engine reports instead of degrading.
///
/// Everything else (missing landmarks, zero tolerances, sessions with no
/// detectable reps) resolves to null/zero/`Unknown` values in the report.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Session has no frames")]
    EmptySession,

    #[error("Invalid analysis options: {0}")]
    InvalidOptions(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl EngineError {
    /// Create an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }

    /// Short label used for failure metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::EmptySession => "empty_session",
            EngineError::InvalidOptions(_) => "invalid_options",
            EngineError::JsonParse(_) => "json_parse",
        }
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidOptions(errors.to_string())
    }
}
