//! Crossover route config loaders

pub mod document_loader;
pub mod js_loader;
pub mod model;
pub mod routes;

pub use document_loader::{DocumentFormat, DocumentLoader};
pub use js_loader::JsModuleLoader;
pub use model::CrossoverConfig;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::{ConversionError, FunctionKind, InputLoader, SourceReader};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Serves documents from memory
    struct MemoryReader(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl SourceReader for MemoryReader {
        async fn read(&self, location: &str) -> Result<String, ConversionError> {
            self.0
                .get(location)
                .map(|s| s.to_string())
                .ok_or_else(|| ConversionError::load(location, "not found"))
        }
    }

    const GAMES_JS: &str = r#"
module.exports = {
  server: {
    port: 4200,
    functions: ['gameComplete'],
    websockets: { // ws: 8083; wss: 8084
      protocol: 'wss',
      host: 'broker.emqx.io',
      port: 8084,
      endpoint: '/mqtt',
    },
    database: {
      type: 'sqlite',
      table: 'games',
    }
  },
  client: {
    axios: {
      baseURL: 'http://localhost:4200',
    }
  },
  routes: {
    gameComplete: {
        type: "javascript/function",
        function: "gameComplete",
        params: {'game_id': null}
    },

    // websockets
    subGame: { type: "websockets/sub", topic: "games/{game_id}" },
    pubGame: { type: "websockets/pub", topic: "games/{game_id}", http: true },

    // database,
    listGames: { type: "db/postgres", method: 'select' },
  }
};
"#;

    const GAMES_YAML: &str = r#"
server:
  port: 4200
  database:
    type: sqlite
    table: games
routes:
  listGames:
    type: db/postgres
    method: select
  gameComplete:
    type: javascript/function
    params:
      game_id: null
"#;

    fn reader() -> Arc<dyn SourceReader> {
        Arc::new(MemoryReader(HashMap::from([
            ("crossover.config.js", GAMES_JS),
            ("routes.yaml", GAMES_YAML),
            ("routes.json", r#"{ "routes": { "ping": { "type": "javascript/function" } } }"#),
            ("routes", r#"{ "routes": { "ping": { "type": "javascript/function" } } }"#),
            ("broken.js", "module.exports = { routes: { ping: { params: {} } } };"),
        ])))
    }

    #[tokio::test]
    async fn test_js_module_loader() {
        let loader = JsModuleLoader::new(reader());
        let api = loader.load("crossover.config.js").await.unwrap();

        assert_eq!(api.base_url.as_deref(), Some("http://localhost:4200"));
        let names: Vec<_> = api.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["gameComplete", "subGame", "pubGame", "listGames"]);
        assert!(matches!(
            api.functions[3].kind,
            FunctionKind::Database { .. }
        ));
    }

    #[tokio::test]
    async fn test_js_module_loader_rejects_invalid_config() {
        let loader = JsModuleLoader::new(reader());
        let err = loader.load("broken.js").await.unwrap_err();
        assert!(err.to_string().contains("invalid crossover config"));
    }

    #[tokio::test]
    async fn test_js_module_loader_missing_source() {
        let loader = JsModuleLoader::new(reader());
        let err = loader.load("missing.js").await.unwrap_err();
        assert!(matches!(err, ConversionError::LoadError { .. }));
    }

    #[tokio::test]
    async fn test_yaml_document_loader() {
        let loader = DocumentLoader::new(reader(), DocumentFormat::Yaml);
        let api = loader.load("routes.yaml").await.unwrap();

        let names: Vec<_> = api.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["listGames", "gameComplete"]);
        assert_eq!(api.base_url.as_deref(), Some("http://localhost:4200"));
    }

    #[tokio::test]
    async fn test_json_document_loader() {
        let loader = DocumentLoader::new(reader(), DocumentFormat::Json);
        let api = loader.load("routes.json").await.unwrap();
        assert_eq!(api.functions.len(), 1);

        // No extension: declared format first
        let api = loader.load("routes").await.unwrap();
        assert_eq!(api.functions[0].name, "ping");
    }

    #[tokio::test]
    async fn test_yaml_loader_reads_json_without_extension() {
        let loader = DocumentLoader::new(reader(), DocumentFormat::Yaml);
        let api = loader.load("routes").await.unwrap();
        assert_eq!(api.functions.len(), 1);
    }
}
