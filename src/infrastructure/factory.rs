//! Wires the built-in loaders and emitters into a [`Dispatcher`]

use std::sync::Arc;

use crate::conversion::{Dispatcher, InputType, OutputType, SourceReader};
use crate::infrastructure::crossover::{DocumentFormat, DocumentLoader, JsModuleLoader};
use crate::infrastructure::openapi::OpenApiEmitter;
use crate::infrastructure::swagger::SwaggerEmitter;

/// Dispatcher with every built-in format registered, reading input through `reader`
pub fn default_dispatcher(reader: Arc<dyn SourceReader>) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register_loader(
        InputType::JsAxios,
        Arc::new(JsModuleLoader::new(reader.clone())),
    );
    dispatcher.register_loader(
        InputType::JsonAxios,
        Arc::new(DocumentLoader::new(reader.clone(), DocumentFormat::Json)),
    );
    dispatcher.register_loader(
        InputType::YamlAxios,
        Arc::new(DocumentLoader::new(reader, DocumentFormat::Yaml)),
    );
    dispatcher.register_emitter(OutputType::Swagger, Arc::new(SwaggerEmitter::new()));
    dispatcher.register_emitter(OutputType::OpenApi, Arc::new(OpenApiEmitter::new()));
    dispatcher
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::source::FileSourceReader;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_every_format_is_registered() {
        let dispatcher = default_dispatcher(Arc::new(FileSourceReader::new()));
        assert_eq!(dispatcher.input_types(), InputType::all());
        assert_eq!(dispatcher.output_types(), OutputType::all());
    }

    #[tokio::test]
    async fn test_default_dispatcher_converts_js_config() {
        let mut file = NamedTempFile::with_suffix(".js").expect("Failed to create temp file");
        writeln!(
            file,
            "module.exports = {{ server: {{ port: 4200 }}, routes: {{ ping: {{ type: 'javascript/function' }} }} }};"
        )
        .unwrap();
        file.flush().unwrap();

        let dispatcher = default_dispatcher(Arc::new(FileSourceReader::new()));
        let api = dispatcher
            .load_input("js:axios", file.path().to_str().unwrap())
            .await
            .unwrap();
        let doc = dispatcher.emit_output("openapi", &api).unwrap();

        assert_eq!(doc["servers"][0]["url"], "http://localhost:4200");
        assert!(doc["paths"]["/ping"]["post"].is_object());
    }
}
