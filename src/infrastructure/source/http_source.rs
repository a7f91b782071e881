//! HTTP-based source reader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::conversion::{ConversionError, SourceReader};

/// Reads input documents from HTTP/HTTPS URLs
pub struct HttpSourceReader {
    client: Client,
}

impl HttpSourceReader {
    pub fn new() -> Result<Self, ConversionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SourceReader for HttpSourceReader {
    async fn read(&self, location: &str) -> Result<String, ConversionError> {
        if !location.starts_with("http://") && !location.starts_with("https://") {
            return Err(ConversionError::load(
                location,
                "HttpSourceReader only handles HTTP(S) URLs",
            ));
        }

        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| ConversionError::load(location, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConversionError::load(location, format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| ConversionError::load(location, format!("Failed to read response body: {e}")))
    }
}
