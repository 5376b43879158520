//! Configuration loading errors.
//!
//! Caching, merging and hydration are total and never fail. The only fallible
//! surface in the crate is reading a [`StyleConfig`](crate::StyleConfig) from text or disk.

use std::path::PathBuf;

/// Error returned when a style configuration cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read style config \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML document did not match the configuration schema.
    #[error("invalid YAML style config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document did not match the configuration schema.
    #[error("invalid JSON style config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither YAML nor JSON.
    #[error(
        "unsupported style config format: \"{}\" (expected .yaml, .yml or .json)",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf },
}
