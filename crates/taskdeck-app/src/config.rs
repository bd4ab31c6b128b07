//! User configuration loaded from `config.toml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use taskdeck_core::SortKey;

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration loaded from `<config-dir>/config.toml`.
///
/// A missing file yields the defaults; a malformed file is an error so a
/// typo never silently reverts the user to defaults.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the state directory the task collection is persisted in.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Sort key applied when the board is opened.
    #[serde(default)]
    pub default_sort: SortKey,
}

impl AppConfig {
    /// Load configuration from `config_dir/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(config_dir: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", config_path.display()))
    }

    /// State directory to use: the configured override, or `fallback`.
    #[must_use]
    pub fn data_dir_or(&self, fallback: impl Into<PathBuf>) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| fallback.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, contents: &str) {
        fs::write(dir.join(CONFIG_FILE), contents).unwrap_or_else(|err| panic!("write config: {err}"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let config = AppConfig::load_from(dir.path()).unwrap_or_else(|err| panic!("load: {err}"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_sort, SortKey::Priority);
    }

    #[test]
    fn configured_values_are_honored() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        write_config(
            dir.path(),
            "data_dir = \"/tmp/deck-state\"\ndefault_sort = \"due_date\"\n",
        );
        let config = AppConfig::load_from(dir.path()).unwrap_or_else(|err| panic!("load: {err}"));
        assert_eq!(config.data_dir.as_deref(), Some(Path::new("/tmp/deck-state")));
        assert_eq!(config.default_sort, SortKey::DueDate);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        write_config(dir.path(), "default_sort = \"alphabetical\"\n");
        assert!(AppConfig::load_from(dir.path()).is_err());
    }

    #[test]
    fn data_dir_fallback_applies_only_when_unset() {
        let configured = AppConfig {
            data_dir: Some(PathBuf::from("/explicit")),
            default_sort: SortKey::Priority,
        };
        assert_eq!(configured.data_dir_or("/fallback"), PathBuf::from("/explicit"));
        assert_eq!(AppConfig::default().data_dir_or("/fallback"), PathBuf::from("/fallback"));
    }
}
