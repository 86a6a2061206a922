use thiserror::Error;

/// Engine-wide error type, consolidating every failure an analysis step can report.
///
/// None of these ever reach a caller of the public [`crate::engine::TextEngine`]
/// entry points: the engine maps them to the documented fallback payloads.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input cannot be analysed (e.g. a non-finite score, a zero count).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A shared NLP resource (lexicon, recognizer pattern, ...) could not be built.
    #[error("NLP resource unavailable: {0}")]
    Unavailable(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Represents configuration-related errors (invalid constants, logging setup).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization of a payload failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Clone for AnalysisError {
    fn clone(&self) -> Self {
        match self {
            AnalysisError::InvalidInput(s) => AnalysisError::InvalidInput(s.clone()),
            AnalysisError::Unavailable(s) => AnalysisError::Unavailable(s.clone()),
            AnalysisError::Internal(s) => AnalysisError::Internal(s.clone()),
            AnalysisError::Config(s) => AnalysisError::Config(s.clone()),
            AnalysisError::Json(e) => AnalysisError::Internal(format!("JSON error: {}", e)),
        }
    }
}

impl From<validator::ValidationErrors> for AnalysisError {
    fn from(err: validator::ValidationErrors) -> Self {
        AnalysisError::Config(format!("Validation errors: {}", err))
    }
}

impl From<regex::Error> for AnalysisError {
    fn from(err: regex::Error) -> Self {
        AnalysisError::Unavailable(format!("Pattern error: {}", err))
    }
}

impl From<tracing_subscriber::util::TryInitError> for AnalysisError {
    fn from(err: tracing_subscriber::util::TryInitError) -> Self {
        AnalysisError::Config(format!("Tracing already initialised: {}", err))
    }
}
