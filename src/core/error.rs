//! Error handling for the crossover core layer.
//!
//! This module defines the `Error` type raised while loading configuration
//! files, the `ValidationError` type returned by [`Config::validate`], and a
//! convenient `Result` alias. Both use `thiserror` and implement conversions
//! from the parsing errors they wrap.
//!
//! # Examples
//!
//! ```
//! use crossover::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```
//!
//! [`Config::validate`]: crate::core::config::Config::validate

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for configuration loading
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

/// Reasons a [`Config`](crate::core::config::Config) is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("input path cannot be empty")]
    EmptyInputPath,

    #[error("output path cannot be empty")]
    EmptyOutputPath,

    #[error("input type cannot be empty")]
    EmptyInputType,

    #[error("output type cannot be empty")]
    EmptyOutputType,

    #[error("output path '{0}' would overwrite the input")]
    OutputOverwritesInput(String),
}
