//! Error types for gmi-analysis
//!
//! Business-rule violations never appear here: they are records on the
//! snapshot. These errors cover unreadable or malformed run input.

use thiserror::Error;

/// Analysis host error type
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request parsed but is unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for analysis host operations
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
