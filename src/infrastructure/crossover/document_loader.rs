//! Loader for `json:axios` and `yaml:axios` input

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::model::CrossoverConfig;
use super::routes::describe;
use crate::conversion::{ApiDescription, ConversionError, InputLoader, SourceReader};

/// Encoding a [`DocumentLoader`] expects when the extension does not say
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

/// Reads a crossover route config written as JSON or YAML
pub struct DocumentLoader {
    reader: Arc<dyn SourceReader>,
    format: DocumentFormat,
}

impl DocumentLoader {
    pub fn new(reader: Arc<dyn SourceReader>, format: DocumentFormat) -> Self {
        Self { reader, format }
    }

    fn parse(&self, source: &str, content: &str) -> Result<JsonValue, ConversionError> {
        let path = source.split(['?', '#']).next().unwrap_or(source);

        if path.ends_with(".json") {
            Ok(serde_json::from_str(content)?)
        } else if path.ends_with(".yaml") || path.ends_with(".yml") {
            Ok(serde_yaml::from_str(content)?)
        } else {
            // Try the declared format first, then the other one
            let parsed: Result<JsonValue, String> = match self.format {
                DocumentFormat::Json => serde_json::from_str(content)
                    .or_else(|_| serde_yaml::from_str(content).map_err(|e| e.to_string())),
                DocumentFormat::Yaml => serde_yaml::from_str(content)
                    .or_else(|_| serde_json::from_str(content).map_err(|e| e.to_string())),
            };
            parsed.map_err(|e| ConversionError::load(source, format!("Failed to parse route config: {e}")))
        }
    }
}

#[async_trait]
impl InputLoader for DocumentLoader {
    async fn load(&self, source: &str) -> Result<ApiDescription, ConversionError> {
        let content = self.reader.read(source).await?;
        let value = self.parse(source, &content)?;

        let config: CrossoverConfig = serde_json::from_value(value)
            .map_err(|e| ConversionError::load(source, format!("invalid crossover config: {e}")))?;

        describe(&config)
    }
}
