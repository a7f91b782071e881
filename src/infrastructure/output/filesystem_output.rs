//! Filesystem-based output service implementation

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::application::{ApplicationError, OutputService, STDOUT_DESTINATION};
use crate::infrastructure::output::OutputFormat;

/// Output service that writes documents to files, or to stdout for `-`
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<(), ApplicationError> {
        // Create parent directory if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                ApplicationError::Output(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = fs::File::create(path).await.map_err(|e| {
            ApplicationError::Output(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(content.as_bytes()).await.map_err(|e| {
            ApplicationError::Output(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.flush().await.map_err(|e| {
            ApplicationError::Output(format!("Failed to flush file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_document(
        &self,
        destination: &str,
        document: &JsonValue,
    ) -> Result<(), ApplicationError> {
        let format = OutputFormat::for_destination(destination);
        let content = format.render(document)?;

        if destination == STDOUT_DESTINATION {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await?;
            stdout.flush().await?;
        } else {
            self.write_file(Path::new(destination), &content).await?;
        }

        debug!(destination, ?format, bytes = content.len(), "Wrote document");
        Ok(())
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}
