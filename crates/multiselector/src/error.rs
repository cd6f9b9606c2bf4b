//! Error types for multiselector.
//!
//! Selection operations never fail. Errors only come from the edges that
//! touch the outside world: loading configuration and encoding or decoding
//! saved selection state.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or (de)serializing state.
#[derive(Error, Debug)]
pub enum SelectorError {
    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML input could not be parsed.
    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value could not be encoded as TOML.
    #[error("failed to encode TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// JSON input could not be parsed.
    #[error("invalid JSON: {0}")]
    JsonParse(#[source] serde_json::Error),

    /// A value could not be encoded as JSON.
    #[error("failed to encode JSON: {0}")]
    JsonEncode(#[source] serde_json::Error),

    /// A configuration file extension is neither `.toml` nor `.json`.
    #[error("unsupported configuration format: {}", .path.display())]
    UnsupportedConfigFormat { path: PathBuf },
}

/// Result type for fallible multiselector operations.
pub type SelectorResult<T> = Result<T, SelectorError>;
