//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration problems found after loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cannot determine location for data. Try timesheet --help for details.")]
    NoDataLocation,
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the entry store.
    pub data_file: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_file", &self.data_file)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: built-in defaults, `config.toml` in the platform config
    /// directory, `config_path`, then `TIMESHEET_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TIMESHEET_"));

        figment.extract()
    }

    /// Where entries are stored.
    pub fn data_file(&self) -> Result<&Path, ConfigError> {
        self.data_file
            .as_deref()
            .ok_or(ConfigError::NoDataLocation)
    }
}

/// Returns the platform-specific config directory for timesheet.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("timesheet"))
}

/// `~/.timesheet/store.db`, if the home directory is known.
fn default_data_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".timesheet").join("store.db"))
}
