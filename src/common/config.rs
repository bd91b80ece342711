//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Statement executor settings
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Result output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Statement executor settings
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ExecutorConfig {
    /// Maximum nesting depth of one symbol reference's expansion.
    /// Stops self-referential symbols (`a` bound to `"x$a"`) from looping forever.
    #[serde(default = "default_substitution_limit")]
    pub substitution_limit: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            substitution_limit: default_substitution_limit(),
        }
    }
}

fn default_substitution_limit() -> usize {
    1024
}

/// Text format for instruction batches and result lists
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Slim list encoding (`[000002:000001:a:000001:b:]`)
    #[default]
    Slim,
    /// JSON array of string arrays
    Json,
}

/// Output configuration
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Default result format when `--output` is not given
    #[serde(default)]
    pub format: Format,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}
