//! Converter configuration
//!
//! A [`Config`] names the input and output documents and the format tags that
//! select a loader and an emitter. Values come from an optional config file
//! and are then overridden by command-line flags.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result, ValidationError};

/// Input format used when none is configured
pub const DEFAULT_INPUT_TYPE: &str = "js:axios";

/// Output format used when none is configured
pub const DEFAULT_OUTPUT_TYPE: &str = "swagger";

/// Configuration for one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path or URL of the document to read
    pub input_path: String,
    /// Path of the document to write, `-` for stdout
    pub output_path: String,
    /// Format tag of the input, e.g. `js:axios`
    pub input_type: String,
    /// Format tag of the output, e.g. `swagger`
    pub output_type: String,
    /// Overrides the title of the emitted document
    pub title: Option<String>,
    /// Overrides the version of the emitted document
    pub api_version: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: String::new(),
            output_path: String::new(),
            input_type: DEFAULT_INPUT_TYPE.to_string(),
            output_type: DEFAULT_OUTPUT_TYPE.to_string(),
            title: None,
            api_version: None,
        }
    }
}

/// Values that replace the corresponding [`Config`] fields when present
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
    pub title: Option<String>,
    pub api_version: Option<String>,
}

impl Config {
    /// Load a TOML, YAML or JSON config file. Files without an extension are read as TOML.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") | None => toml::from_str(&content)?,
            Some(other) => {
                return Err(Error::config(format!(
                    "unsupported config file extension '.{other}' (expected toml, yaml or json)"
                )));
            }
        };

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Replace fields with any values set in `overrides`
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(input_path) = overrides.input_path {
            self.input_path = input_path;
        }
        if let Some(output_path) = overrides.output_path {
            self.output_path = output_path;
        }
        if let Some(input_type) = overrides.input_type {
            self.input_type = input_type;
        }
        if let Some(output_type) = overrides.output_type {
            self.output_type = output_type;
        }
        if overrides.title.is_some() {
            self.title = overrides.title;
        }
        if overrides.api_version.is_some() {
            self.api_version = overrides.api_version;
        }
        self
    }

    /// Check that every required field is present.
    ///
    /// Whether the format tags are supported is decided by the dispatcher.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.input_path.trim().is_empty() {
            return Err(ValidationError::EmptyInputPath);
        }
        if self.output_path.trim().is_empty() {
            return Err(ValidationError::EmptyOutputPath);
        }
        if self.input_type.trim().is_empty() {
            return Err(ValidationError::EmptyInputType);
        }
        if self.output_type.trim().is_empty() {
            return Err(ValidationError::EmptyOutputType);
        }
        if self.output_path != "-" && same_file(&self.input_path, &self.output_path) {
            return Err(ValidationError::OutputOverwritesInput(
                self.output_path.clone(),
            ));
        }
        Ok(())
    }
}

/// Whether two local paths name the same file. Existing files are compared
/// after resolving symlinks, anything else after lexical normalization.
fn same_file(input: &str, output: &str) -> bool {
    if input.starts_with("http://") || input.starts_with("https://") {
        return false;
    }
    match (std::fs::canonicalize(input), std::fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        _ => normalize(Path::new(input)) == normalize(Path::new(output)),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
