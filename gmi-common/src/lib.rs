//! # GMI Common Library
//!
//! Shared code for the GMI analysis crates:
//! - Error types (`Error`, `Result`)
//! - Bootstrap configuration loading and config-file resolution
//! - Logging initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
