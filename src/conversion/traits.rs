//! Port interfaces for the conversion domain

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::conversion::{ApiDescription, ConversionError};

/// Reads the raw text of an input document
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Read the document at `location`
    async fn read(&self, location: &str) -> Result<String, ConversionError>;
}

/// Turns an input document into an API description
#[async_trait]
pub trait InputLoader: Send + Sync {
    /// Load and parse the document at `source`
    async fn load(&self, source: &str) -> Result<ApiDescription, ConversionError>;
}

/// Renders an API description in an output format
pub trait OutputEmitter: Send + Sync {
    /// Build the output document
    fn emit(&self, api: &ApiDescription) -> Result<JsonValue, ConversionError>;
}
