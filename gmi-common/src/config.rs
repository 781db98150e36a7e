//! Configuration loading and config-file resolution
//!
//! A single TOML file carries both the bootstrap settings read here
//! (`[logging]`) and the analysis sections read by `gmi-analysis`
//! (`[validation]`, `[estimation]`, `[matching]`, `[roi]`). Each reader
//! ignores the sections it does not own.
//!
//! # Resolution priority
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`GMI_CONFIG`)
//! 3. User config file (`~/.config/gmi/gmi.toml` or platform equivalent)
//! 4. Built-in defaults (no file)
//!
//! A missing file is never fatal: the caller gets `None` and falls back to
//! compiled defaults. A file that exists but does not parse is an error.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "GMI_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full `EnvFilter`
    /// directive such as `gmi_analysis=debug,info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON-formatted log lines instead of the human-readable format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load bootstrap config from `path`, or defaults when `path` is `None`
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => read_toml_file(p),
            None => Ok(Self::default()),
        }
    }
}

/// Parse a TOML file into any deserializable config section
pub fn read_toml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    let parsed = toml::from_str(&content)?;
    debug!("Loaded config file {}", path.display());
    Ok(parsed)
}

/// Resolves which config file (if any) a run should use
#[derive(Debug, Clone)]
pub struct ConfigFileResolver {
    app_name: String,
    cli_arg: Option<PathBuf>,
}

impl ConfigFileResolver {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            cli_arg: None,
        }
    }

    /// Set the command-line override
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Resolve the config file path following the documented priority
    ///
    /// Explicit paths (CLI, environment) are returned even when the file is
    /// missing so the subsequent read reports a precise error; the implicit
    /// user config path is only returned when the file exists.
    pub fn resolve(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_arg {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        let user_config = self.default_config_path();
        match user_config {
            Some(path) if path.exists() => Some(path),
            Some(path) => {
                debug!(
                    "No config file at {}, using built-in defaults",
                    path.display()
                );
                None
            }
            None => {
                warn!("Could not determine config directory, using built-in defaults");
                None
            }
        }
    }

    /// Platform config location: `<config_dir>/<app>/<app>.toml`
    pub fn default_config_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| {
            d.join(&self.app_name)
                .join(format!("{}.toml", self.app_name))
        })
    }
}
