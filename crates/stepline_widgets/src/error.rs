//! Error types for stepline_widgets
//!
//! Widget operations clamp their inputs and never fail; only loading a
//! configuration file can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a [`crate::StepperConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has a malformed value (including colors)
    #[error("invalid stepper config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;
