//! Composite reader that picks a strategy from the location

use async_trait::async_trait;

use super::{FileSourceReader, HttpSourceReader};
use crate::conversion::{ConversionError, SourceReader};

/// Reads URLs over HTTP and everything else from the filesystem
pub struct CompositeSourceReader {
    http: HttpSourceReader,
    file: FileSourceReader,
}

impl CompositeSourceReader {
    pub fn new() -> Result<Self, ConversionError> {
        Ok(Self {
            http: HttpSourceReader::new()?,
            file: FileSourceReader::new(),
        })
    }
}

#[async_trait]
impl SourceReader for CompositeSourceReader {
    async fn read(&self, location: &str) -> Result<String, ConversionError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            tracing::debug!("CompositeSourceReader: Using HTTP reader for {location}");
            self.http.read(location).await
        } else {
            tracing::debug!("CompositeSourceReader: Using file reader for {location}");
            self.file.read(location).await
        }
    }
}
