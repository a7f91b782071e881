//! File-based source reader
//!
//! This reader handles only file I/O. Parsing is done by the loaders.

use async_trait::async_trait;
use tokio::fs;

use crate::conversion::{ConversionError, SourceReader};

/// Reads input documents from local files
pub struct FileSourceReader;

impl FileSourceReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSourceReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceReader for FileSourceReader {
    async fn read(&self, location: &str) -> Result<String, ConversionError> {
        fs::read_to_string(location)
            .await
            .map_err(|e| ConversionError::load(location, e))
    }
}
