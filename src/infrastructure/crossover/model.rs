//! Serde model of a crossover route configuration
//!
//! The same structure is read from a `crossover.config.js` module and from its
//! JSON/YAML equivalents. Field names follow the JavaScript config
//! (`baseURL`, `topicPrefix`).

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Root of a crossover config
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    pub info: Option<InfoConfig>,
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub routes: IndexMap<String, RouteConfig>,
}

/// Optional document metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: Option<u16>,
    /// Names of the server functions exposed as routes
    pub functions: Vec<String>,
    pub websockets: Option<WebsocketConfig>,
    pub database: Option<DatabaseConfig>,
}

/// MQTT broker reached over websockets
#[derive(Debug, Clone, Deserialize)]
pub struct WebsocketConfig {
    #[serde(default = "default_ws_protocol")]
    pub protocol: String,
    pub host: String,
    pub port: Option<u16>,
    #[serde(default)]
    pub endpoint: String,
    #[serde(rename = "topicPrefix", default = "default_topic_prefix")]
    pub topic_prefix: String,
}

fn default_ws_protocol() -> String {
    "ws".to_string()
}

fn default_topic_prefix() -> String {
    "/".to_string()
}

impl WebsocketConfig {
    pub fn broker_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}{}", self.protocol, self.host, port, self.endpoint),
            None => format!("{}://{}{}", self.protocol, self.host, self.endpoint),
        }
    }

    /// Topic as published on the broker
    pub fn full_topic(&self, topic: &str) -> String {
        format!("{}{}", self.topic_prefix, topic)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub table: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub axios: Option<AxiosConfig>,
}

/// Options passed to `axios.create`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AxiosConfig {
    #[serde(rename = "baseURL")]
    pub base_url: Option<String>,
}

/// One entry under `routes`
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// `javascript/function`, `db/<engine>`, `websockets/pub` or `websockets/sub`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Server function backing a `javascript/function` route
    #[serde(default)]
    pub function: Option<String>,
    /// `select`, `insert` or `query` for database routes
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    /// Whether a publish route is also served over HTTP
    #[serde(default)]
    pub http: bool,
    /// Param name to default value, `null` when the caller must provide it
    #[serde(default)]
    pub params: IndexMap<String, JsonValue>,
}
