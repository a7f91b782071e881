//! Use case for converting an input document into an output document

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::application::{ApplicationError, ConvertResponse, OutputService};
use crate::conversion::{Dispatcher, OutputType};
use crate::core::Config;

/// Use case for one conversion run
pub struct ConvertUseCase {
    dispatcher: Arc<Dispatcher>,
    output_service: Arc<dyn OutputService>,
}

impl ConvertUseCase {
    pub fn new(dispatcher: Arc<Dispatcher>, output_service: Arc<dyn OutputService>) -> Self {
        Self {
            dispatcher,
            output_service,
        }
    }

    pub async fn execute(&self, config: Config) -> Result<ConvertResponse, ApplicationError> {
        // 1. Validate config
        config.validate()?;

        // 2. Reject an unknown output format before reading anything
        OutputType::from_str(&config.output_type)?;

        // 3. Load input
        let mut api = self
            .dispatcher
            .load_input(&config.input_type, &config.input_path)
            .await?;

        if let Some(title) = config.title {
            api.title = title;
        }
        if let Some(version) = config.api_version {
            api.version = version;
        }

        // 4. Emit and write
        let document = self.dispatcher.emit_output(&config.output_type, &api)?;
        self.output_service
            .write_document(&config.output_path, &document)
            .await?;

        let response = ConvertResponse {
            functions_count: api.functions.len(),
            endpoints_count: api.http_functions().count(),
            output_path: config.output_path,
        };
        info!(
            functions = response.functions_count,
            endpoints = response.endpoints_count,
            output = %response.output_path,
            "Conversion complete"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::{
        ApiDescription, ConversionError, FunctionKind, FunctionType, InputLoader, InputType,
        OutputEmitter,
    };
    use crate::core::ValidationError;
    use async_trait::async_trait;
    use serde_json::{Value as JsonValue, json};
    use std::sync::Mutex;

    struct MockLoader;

    #[async_trait]
    impl InputLoader for MockLoader {
        async fn load(&self, source: &str) -> Result<ApiDescription, ConversionError> {
            if source == "missing.js" {
                return Err(ConversionError::load(source, "not found"));
            }
            Ok(ApiDescription {
                functions: vec![
                    FunctionType::new("ping", FunctionKind::Function { handler: None }),
                    FunctionType::new(
                        "subGame",
                        FunctionKind::Subscribe {
                            topic: "/games".into(),
                        },
                    ),
                ],
                ..Default::default()
            })
        }
    }

    struct MockEmitter;

    impl OutputEmitter for MockEmitter {
        fn emit(&self, api: &ApiDescription) -> Result<JsonValue, ConversionError> {
            Ok(json!({ "title": api.title, "version": api.version }))
        }
    }

    #[derive(Default)]
    struct RecordingOutput(Mutex<Vec<(String, JsonValue)>>);

    #[async_trait]
    impl OutputService for RecordingOutput {
        async fn write_document(
            &self,
            destination: &str,
            document: &JsonValue,
        ) -> Result<(), ApplicationError> {
            self.0
                .lock()
                .unwrap()
                .push((destination.to_string(), document.clone()));
            Ok(())
        }
    }

    fn use_case() -> (ConvertUseCase, Arc<RecordingOutput>) {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_loader(InputType::JsAxios, Arc::new(MockLoader));
        dispatcher.register_emitter(OutputType::Swagger, Arc::new(MockEmitter));
        let output = Arc::new(RecordingOutput::default());
        (
            ConvertUseCase::new(Arc::new(dispatcher), output.clone()),
            output,
        )
    }

    fn config() -> Config {
        Config {
            input_path: "crossover.config.js".to_string(),
            output_path: "swagger.json".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let (use_case, output) = use_case();

        let response = use_case.execute(config()).await.unwrap();
        assert_eq!(response.functions_count, 2);
        assert_eq!(response.endpoints_count, 1);
        assert_eq!(response.output_path, "swagger.json");

        let written = output.0.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, "swagger.json");
        assert_eq!(written[0].1["title"], "Crossover API");
    }

    #[tokio::test]
    async fn test_execute_applies_title_and_version() {
        let (use_case, output) = use_case();
        let config = Config {
            title: Some("Games".to_string()),
            api_version: Some("2.1.0".to_string()),
            ..config()
        };

        use_case.execute(config).await.unwrap();
        let written = output.0.lock().unwrap();
        assert_eq!(written[0].1, json!({ "title": "Games", "version": "2.1.0" }));
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_config() {
        let (use_case, output) = use_case();
        let config = Config {
            output_path: String::new(),
            ..config()
        };

        let err = use_case.execute(config).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Validation(ValidationError::EmptyOutputPath)
        ));
        assert!(output.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_rejects_unknown_input_type() {
        let (use_case, _) = use_case();
        let config = Config {
            input_type: "ts:fetch".to_string(),
            ..config()
        };

        let err = use_case.execute(config).await.unwrap_err();
        assert!(err.to_string().contains("unsupported input type"));
    }

    #[tokio::test]
    async fn test_execute_rejects_unknown_output_type_before_loading() {
        let (use_case, _) = use_case();
        let config = Config {
            input_path: "missing.js".to_string(),
            output_type: "raml".to_string(),
            ..config()
        };

        let err = use_case.execute(config).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Conversion(ConversionError::UnsupportedOutputType(_))
        ));
    }

    #[tokio::test]
    async fn test_execute_propagates_load_errors() {
        let (use_case, output) = use_case();
        let config = Config {
            input_path: "missing.js".to_string(),
            ..config()
        };

        let err = use_case.execute(config).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Conversion(ConversionError::LoadError { .. })
        ));
        assert!(output.0.lock().unwrap().is_empty());
    }
}
