//! Tests for config-file resolution and bootstrap config loading
//!
//! Uses serial_test to prevent environment variable races: tests that touch
//! GMI_CONFIG are marked #[serial].

use gmi_common::config::{read_toml_file, ConfigFileResolver, TomlConfig, CONFIG_ENV_VAR};
use gmi_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

#[test]
#[serial]
fn test_env_var_used_when_no_cli_arg() {
    let test_path = "/tmp/gmi-test-env-config.toml";
    env::set_var(CONFIG_ENV_VAR, test_path);

    let resolved = ConfigFileResolver::new("gmi-test").resolve();
    assert_eq!(resolved, Some(PathBuf::from(test_path)));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_cli_arg_overrides_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    let resolved = ConfigFileResolver::new("gmi-test")
        .with_cli_arg(Some(PathBuf::from("/tmp/from-cli.toml")))
        .resolve();
    assert_eq!(resolved, Some(PathBuf::from("/tmp/from-cli.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    env::set_var(CONFIG_ENV_VAR, "   ");

    // Unlikely app name so no real user config file is picked up
    let resolved = ConfigFileResolver::new("gmi-test-nonexistent-app").resolve();
    assert!(resolved.is_none());

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_default_config_path_shape() {
    let resolver = ConfigFileResolver::new("gmi");
    if let Some(path) = resolver.default_config_path() {
        assert!(path.ends_with("gmi/gmi.toml"));
    }
}

#[test]
fn test_load_or_default_without_path() {
    let config = TomlConfig::load_or_default(None).unwrap();
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_read_toml_file_parses_logging() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[logging]\nlevel = \"warn\"\njson = true").unwrap();

    let config: TomlConfig = read_toml_file(file.path()).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.json);
}

#[test]
fn test_read_toml_file_missing_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = read_toml_file::<TomlConfig>(&missing).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_read_toml_file_malformed_is_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[logging\nlevel = ").unwrap();

    let err = read_toml_file::<TomlConfig>(file.path()).unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
}
