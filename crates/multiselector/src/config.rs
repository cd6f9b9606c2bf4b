//! Selector configuration.
//!
//! Configuration can be written in TOML or JSON. Every field is optional and
//! falls back to its default, so an empty document is a valid configuration.
//!
//! ```toml
//! mode = "single"
//!
//! [session]
//! clear_on_start = true
//! clear_on_finish = false
//! ```

use std::path::Path;

use multiselector_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{SelectorError, SelectorResult};
use crate::policy::SelectionMode;

/// Top-level selector configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Which built-in policy the selector uses.
    pub mode: SelectionMode,
    /// Selection session behavior.
    pub session: SessionConfig,
}

/// How a [`SelectionSession`](crate::SelectionSession) treats the selection
/// when it starts and finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Clear any existing selection when a session starts.
    pub clear_on_start: bool,
    /// Clear the selection when a session finishes.
    pub clear_on_finish: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clear_on_start: true,
            clear_on_finish: false,
        }
    }
}

impl SelectorConfig {
    /// Parses configuration from TOML.
    pub fn from_toml_str(source: &str) -> SelectorResult<Self> {
        let config: Self = toml::from_str(source)?;
        tracing::debug!(target: targets::CONFIG, ?config, "parsed TOML configuration");
        Ok(config)
    }

    /// Parses configuration from JSON.
    pub fn from_json_str(source: &str) -> SelectorResult<Self> {
        let config: Self = serde_json::from_str(source).map_err(SelectorError::JsonParse)?;
        tracing::debug!(target: targets::CONFIG, ?config, "parsed JSON configuration");
        Ok(config)
    }

    /// Loads configuration from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> SelectorResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> SelectorResult<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(SelectorError::UnsupportedConfigFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let source = std::fs::read_to_string(path).map_err(|source| SelectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            target: targets::CONFIG,
            path = %path.display(),
            "loading selector configuration"
        );
        parse(&source)
    }

    /// Serializes the configuration as pretty-printed TOML.
    pub fn to_toml_string(&self) -> SelectorResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
