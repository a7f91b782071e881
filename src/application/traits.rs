//! Port interfaces for the application layer

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::application::ApplicationError;

/// Destination that writes to standard output
pub const STDOUT_DESTINATION: &str = "-";

/// Service for writing an emitted document to its destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Serialize `document` and write it to `destination`
    async fn write_document(
        &self,
        destination: &str,
        document: &JsonValue,
    ) -> Result<(), ApplicationError>;
}
