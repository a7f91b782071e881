//! Loader for `js:axios` input: a `crossover.config.js` module

use std::sync::Arc;

use async_trait::async_trait;

use super::model::CrossoverConfig;
use super::routes::describe;
use crate::conversion::{ApiDescription, ConversionError, InputLoader, SourceReader};
use crate::infrastructure::javascript::parse_module_exports;

/// Reads the object exported by a crossover JavaScript config
pub struct JsModuleLoader {
    reader: Arc<dyn SourceReader>,
}

impl JsModuleLoader {
    pub fn new(reader: Arc<dyn SourceReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl InputLoader for JsModuleLoader {
    async fn load(&self, source: &str) -> Result<ApiDescription, ConversionError> {
        let content = self.reader.read(source).await?;

        let exported = parse_module_exports(&content)?;
        let config: CrossoverConfig = serde_json::from_value(exported)
            .map_err(|e| ConversionError::load(source, format!("invalid crossover config: {e}")))?;

        describe(&config)
    }
}
