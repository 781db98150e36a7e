//! Common error types for GMI

use thiserror::Error;

/// Common result type for GMI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across GMI crates
///
/// Business-rule violations found while analysing an item are never reported
/// through this type; they travel inside the analysis artifacts. This enum
/// covers host-level failures only (unreadable files, malformed config).
#[derive(Error, Debug)]
pub enum Error {
    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
