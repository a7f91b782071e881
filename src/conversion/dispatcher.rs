//! Routes format tags to the loader or emitter that handles them

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::conversion::{
    ApiDescription, ConversionError, InputLoader, InputType, OutputEmitter, OutputType,
};

pub struct Dispatcher {
    loaders: HashMap<InputType, Arc<dyn InputLoader>>,
    emitters: HashMap<OutputType, Arc<dyn OutputEmitter>>,
}

impl Dispatcher {
    /// Creates a dispatcher with nothing registered
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
            emitters: HashMap::new(),
        }
    }

    pub fn register_loader(&mut self, input_type: InputType, loader: Arc<dyn InputLoader>) {
        self.loaders.insert(input_type, loader);
    }

    pub fn register_emitter(&mut self, output_type: OutputType, emitter: Arc<dyn OutputEmitter>) {
        self.emitters.insert(output_type, emitter);
    }

    /// Load `input_path` with the loader registered for `input_type`
    pub async fn load_input(
        &self,
        input_type: &str,
        input_path: &str,
    ) -> Result<ApiDescription, ConversionError> {
        let tag = InputType::from_str(input_type)?;
        let loader = self
            .loaders
            .get(&tag)
            .ok_or_else(|| ConversionError::UnsupportedInputType(input_type.to_string()))?;

        tracing::info!(input_type = %tag, input_path, "Loading input");
        let api = loader.load(input_path).await?;
        tracing::debug!(
            functions = api.functions.len(),
            "Loaded {} function(s) from {}",
            api.functions.len(),
            input_path
        );
        Ok(api)
    }

    /// Emit `api` with the emitter registered for `output_type`
    pub fn emit_output(
        &self,
        output_type: &str,
        api: &ApiDescription,
    ) -> Result<JsonValue, ConversionError> {
        let tag = OutputType::from_str(output_type)?;
        let emitter = self
            .emitters
            .get(&tag)
            .ok_or_else(|| ConversionError::UnsupportedOutputType(output_type.to_string()))?;

        tracing::info!(output_type = %tag, "Emitting document");
        emitter.emit(api)
    }

    /// Input formats with a registered loader
    pub fn input_types(&self) -> Vec<InputType> {
        InputType::all()
            .into_iter()
            .filter(|t| self.loaders.contains_key(t))
            .collect()
    }

    /// Output formats with a registered emitter
    pub fn output_types(&self) -> Vec<OutputType> {
        OutputType::all()
            .into_iter()
            .filter(|t| self.emitters.contains_key(t))
            .collect()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
