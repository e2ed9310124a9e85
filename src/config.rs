//! CLI configuration.
//!
//! Looked up in order: an explicit path (`--config` / `INTENT_SQL_CONFIG`),
//! `./intent-sql.toml`, then `<config dir>/intent-sql/config.toml`. When no
//! file exists the defaults apply.
//!
//! ```toml
//! [output]
//! format = "json"
//! color = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{TranslateError, TranslateResult};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "intent-sql.toml";

/// How the CLI prints a translated statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Statement and numbered parameters
    #[default]
    Text,
    /// `{"statement": ..., "parameters": [...]}`
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> TranslateResult<Self> {
        toml::from_str(content).map_err(|e| TranslateError::Config(e.to_string()))
    }

    /// Read a configuration file.
    pub fn from_file(path: &Path) -> TranslateResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslateError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve and load the configuration.
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit: Option<&Path>) -> TranslateResult<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        for path in Self::search_paths() {
            if path.is_file() {
                tracing::debug!("Loading config from {}", path.display());
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Implicit configuration locations, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("intent-sql").join("config.toml"));
        }
        paths
    }
}
