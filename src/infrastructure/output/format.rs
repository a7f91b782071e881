//! Serialization of emitted documents

use std::path::Path;

use serde_json::Value as JsonValue;

use crate::application::ApplicationError;

/// Text format of a written document, picked from the destination extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    /// `.yaml` and `.yml` destinations get YAML, everything else (stdout included) JSON
    pub fn for_destination(destination: &str) -> Self {
        let extension = Path::new(destination)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            _ => OutputFormat::Json,
        }
    }

    /// Render `document`, always ending with a newline
    pub fn render(&self, document: &JsonValue) -> Result<String, ApplicationError> {
        let mut text = match self {
            OutputFormat::Json => serde_json::to_string_pretty(document)
                .map_err(|e| ApplicationError::Output(format!("Failed to render JSON: {e}")))?,
            OutputFormat::Yaml => serde_yaml::to_string(document)
                .map_err(|e| ApplicationError::Output(format!("Failed to render YAML: {e}")))?,
        };
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_for_destination() {
        assert_eq!(OutputFormat::for_destination("swagger.json"), OutputFormat::Json);
        assert_eq!(OutputFormat::for_destination("out/api.YAML"), OutputFormat::Yaml);
        assert_eq!(OutputFormat::for_destination("api.yml"), OutputFormat::Yaml);
        assert_eq!(OutputFormat::for_destination("-"), OutputFormat::Json);
        assert_eq!(OutputFormat::for_destination("swagger"), OutputFormat::Json);
    }

    #[test]
    fn test_render_keeps_key_order() {
        let document = json!({ "swagger": "2.0", "info": { "title": "Games" }, "paths": {} });

        let text = OutputFormat::Json.render(&document).unwrap();
        assert!(text.starts_with("{\n  \"swagger\": \"2.0\""));
        assert!(text.ends_with("}\n"));

        let text = OutputFormat::Yaml.render(&document).unwrap();
        assert!(text.starts_with("swagger:"));
        let parsed: JsonValue = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, document);
    }
}
