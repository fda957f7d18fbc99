//! Configuration loading.
//!
//! Looks for `wakearc.toml` under the platform configuration directory.
//! A missing file is the common case and loads as the empty configuration;
//! a present-but-broken file is a real error and propagates.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::validation::validate_config;
use super::EngineConfig;

/// Default configuration path: `<config dir>/wakearc/wakearc.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wakearc").join("wakearc.toml"))
}

/// Load configuration from the default location.
///
/// Returns the empty configuration (all defaults) when no file exists.
pub fn load() -> Result<EngineConfig> {
    match default_config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => {
            log_indented!("No configuration file; using defaults");
            Ok(EngineConfig::default())
        }
    }
}

/// Load and validate configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    let config: EngineConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse configuration at {}", path.display()))?;

    validate_config(&config)?;

    log_block_start!("Loaded configuration from {}", path.display());
    log_indented!("window {} - {}", config.wake_time(), config.bed_time());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_path_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "wake = \"06:30:00\"\nbed = \"20:30:00\"\nresync_interval = 30"
        )
        .unwrap();

        let config = load_from_path(file.path()).unwrap();
        assert_eq!(config.wake.as_deref(), Some("06:30:00"));
        assert_eq!(config.resync_interval_secs(), 30);
        assert_eq!(config.default_bounds().total_waking_minutes(), 14 * 60);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wake = [not toml").unwrap();
        assert!(load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_out_of_range_value_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resync_interval = 2").unwrap();
        assert!(load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error_for_explicit_path() {
        assert!(load_from_path(Path::new("/nonexistent/wakearc.toml")).is_err());
    }
}
