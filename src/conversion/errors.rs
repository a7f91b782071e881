//! Error types for the conversion domain

use thiserror::Error;

use crate::conversion::{InputType, OutputType};

/// Errors that can occur while loading or emitting an API description
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("unsupported input type '{0}' (supported: {supported})", supported = supported_inputs())]
    UnsupportedInputType(String),

    #[error("unsupported output type '{0}' (supported: {supported})", supported = supported_outputs())]
    UnsupportedOutputType(String),

    #[error("Failed to load {source_name}: {message}")]
    LoadError {
        source_name: String,
        message: String,
    },

    #[error("Parse error at {line}:{column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid route '{route}': {reason}")]
    InvalidRoute { route: String, reason: String },

    #[error("Emit error: {0}")]
    EmitError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl ConversionError {
    pub fn load(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::LoadError {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid_route(route: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRoute {
            route: route.into(),
            reason: reason.into(),
        }
    }
}

fn supported_inputs() -> String {
    InputType::all()
        .iter()
        .map(InputType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn supported_outputs() -> String {
    OutputType::all()
        .iter()
        .map(OutputType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
