//! Core types for the conversion domain

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::conversion::ConversionError;

/// Title used when neither the input nor the config names one
pub const DEFAULT_TITLE: &str = "Crossover API";

/// Version used when neither the input nor the config names one
pub const DEFAULT_API_VERSION: &str = "1.0.0";

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    /// Route config exported by a JavaScript module, consumed by the axios client
    JsAxios,
    /// Route config written as JSON
    JsonAxios,
    /// Route config written as YAML
    YamlAxios,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::JsAxios => "js:axios",
            InputType::JsonAxios => "json:axios",
            InputType::YamlAxios => "yaml:axios",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            InputType::JsAxios => "crossover.config.js module (module.exports / export default)",
            InputType::JsonAxios => "crossover route config as JSON",
            InputType::YamlAxios => "crossover route config as YAML",
        }
    }

    pub fn all() -> Vec<InputType> {
        vec![InputType::JsAxios, InputType::JsonAxios, InputType::YamlAxios]
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "js:axios" => Ok(InputType::JsAxios),
            "json:axios" => Ok(InputType::JsonAxios),
            "yaml:axios" | "yml:axios" => Ok(InputType::YamlAxios),
            _ => Err(ConversionError::UnsupportedInputType(s.to_string())),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// Swagger 2.0
    Swagger,
    /// OpenAPI 3.0
    OpenApi,
}

impl OutputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Swagger => "swagger",
            OutputType::OpenApi => "openapi",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputType::Swagger => "Swagger 2.0 document",
            OutputType::OpenApi => "OpenAPI 3.0.3 document",
        }
    }

    pub fn all() -> Vec<OutputType> {
        vec![OutputType::Swagger, OutputType::OpenApi]
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "swagger" | "swagger2" => Ok(OutputType::Swagger),
            "openapi" | "openapi3" => Ok(OutputType::OpenApi),
            _ => Err(ConversionError::UnsupportedOutputType(s.to_string())),
        }
    }
}

/// JSON type of an argument, inferred from its default value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    /// No default to infer from
    Unknown,
}

impl ValueType {
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => ValueType::Unknown,
            JsonValue::Bool(_) => ValueType::Boolean,
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => ValueType::Integer,
            JsonValue::Number(_) => ValueType::Number,
            JsonValue::String(_) => ValueType::String,
            JsonValue::Array(_) => ValueType::Array,
            JsonValue::Object(_) => ValueType::Object,
        }
    }
}

/// One named input of a function
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Value the client fills in when the caller omits the argument
    pub default: Option<JsonValue>,
    pub required: bool,
    /// Declared type, used when there is no default to infer from
    pub declared: Option<ValueType>,
}

impl Argument {
    /// An argument the caller must always provide
    pub fn required() -> Self {
        Self {
            default: None,
            required: true,
            declared: None,
        }
    }

    /// A required string argument, e.g. a topic placeholder
    pub fn required_string() -> Self {
        Self {
            declared: Some(ValueType::String),
            ..Self::required()
        }
    }

    /// An optional argument falling back to `default`
    pub fn with_default(default: JsonValue) -> Self {
        Self {
            default: Some(default),
            required: false,
            declared: None,
        }
    }

    /// Build from a route param value: `null` marks the param required
    pub fn from_param(value: &JsonValue) -> Self {
        if value.is_null() {
            Self::required()
        } else {
            Self::with_default(value.clone())
        }
    }

    pub fn value_type(&self) -> ValueType {
        match (&self.default, self.declared) {
            (Some(default), _) => ValueType::of(default),
            (None, Some(declared)) => declared,
            (None, None) => ValueType::Unknown,
        }
    }
}

/// Arguments of a function, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(IndexMap<String, Argument>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an argument, replacing any previous one with the same name
    pub fn insert(&mut self, name: impl Into<String>, argument: Argument) -> Option<Argument> {
        self.0.insert(name.into(), argument)
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Argument)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Names of the arguments that have no default
    pub fn required_names(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, arg)| arg.required)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl FromIterator<(String, Argument)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Argument)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = (&'a String, &'a Argument);
    type IntoIter = indexmap::map::Iter<'a, String, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Statement a database route runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbMethod {
    Select,
    Insert,
    Query,
}

impl FromStr for DbMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(DbMethod::Select),
            "insert" => Ok(DbMethod::Insert),
            "query" => Ok(DbMethod::Query),
            other => Err(format!(
                "unknown database method '{other}' (expected select, insert or query)"
            )),
        }
    }
}

impl fmt::Display for DbMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbMethod::Select => write!(f, "select"),
            DbMethod::Insert => write!(f, "insert"),
            DbMethod::Query => write!(f, "query"),
        }
    }
}

/// What a function does when called
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionKind {
    /// Server-side JavaScript function
    Function { handler: Option<String> },
    /// SQL statement against the configured database
    Database {
        engine: String,
        method: DbMethod,
        table: Option<String>,
        query: Option<String>,
    },
    /// MQTT publish, optionally bridged over HTTP
    Publish { topic: String, http: bool },
    /// MQTT subscription
    Subscribe { topic: String },
}

impl FunctionKind {
    /// Documentation tag grouping functions of this kind
    pub fn tag(&self) -> &'static str {
        match self {
            FunctionKind::Function { .. } => "functions",
            FunctionKind::Database { .. } => "database",
            FunctionKind::Publish { .. } | FunctionKind::Subscribe { .. } => "websockets",
        }
    }

    /// Whether the client reaches this function through `POST /<name>`
    pub fn is_http(&self) -> bool {
        match self {
            FunctionKind::Function { .. } | FunctionKind::Database { .. } => true,
            FunctionKind::Publish { http, .. } => *http,
            FunctionKind::Subscribe { .. } => false,
        }
    }
}

/// One API operation
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub name: String,
    pub arguments: Arguments,
    pub kind: FunctionKind,
    pub description: Option<String>,
}

impl FunctionType {
    pub fn new(name: impl Into<String>, kind: FunctionKind) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::new(),
            kind,
            description: None,
        }
    }

    /// HTTP path of the function, if it has one
    pub fn http_path(&self) -> Option<String> {
        self.kind.is_http().then(|| format!("/{}", self.name))
    }
}

/// Intermediate representation produced by every loader
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDescription {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    /// Base URL the client sends requests to
    pub base_url: Option<String>,
    /// Broker URL used by publish and subscribe functions
    pub broker_url: Option<String>,
    pub functions: Vec<FunctionType>,
}

impl Default for ApiDescription {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            description: None,
            base_url: None,
            broker_url: None,
            functions: Vec::new(),
        }
    }
}

impl ApiDescription {
    pub fn http_functions(&self) -> impl Iterator<Item = &FunctionType> {
        self.functions.iter().filter(|f| f.kind.is_http())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_type_from_str() {
        assert_eq!(InputType::from_str("js:axios").unwrap(), InputType::JsAxios);
        assert_eq!(InputType::from_str("JS:Axios").unwrap(), InputType::JsAxios);
        assert_eq!(InputType::from_str("yml:axios").unwrap(), InputType::YamlAxios);
        assert_eq!(InputType::from_str("json:axios").unwrap(), InputType::JsonAxios);

        let err = InputType::from_str("ts:fetch").unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedInputType(tag) if tag == "ts:fetch"));
    }

    #[test]
    fn test_output_type_from_str() {
        assert_eq!(OutputType::from_str("swagger").unwrap(), OutputType::Swagger);
        assert_eq!(OutputType::from_str("OpenAPI").unwrap(), OutputType::OpenApi);
        assert!(OutputType::from_str("raml").is_err());
    }

    #[test]
    fn test_type_tags_round_trip_through_display() {
        for input in InputType::all() {
            assert_eq!(InputType::from_str(&input.to_string()).unwrap(), input);
        }
        for output in OutputType::all() {
            assert_eq!(OutputType::from_str(&output.to_string()).unwrap(), output);
        }
    }

    #[test]
    fn test_argument_from_param() {
        let required = Argument::from_param(&JsonValue::Null);
        assert!(required.required);
        assert_eq!(required.value_type(), ValueType::Unknown);

        let flag = Argument::from_param(&json!(false));
        assert!(!flag.required);
        assert_eq!(flag.default, Some(json!(false)));
        assert_eq!(flag.value_type(), ValueType::Boolean);

        assert_eq!(Argument::from_param(&json!(3)).value_type(), ValueType::Integer);
        assert_eq!(Argument::from_param(&json!(0.5)).value_type(), ValueType::Number);
        assert_eq!(Argument::from_param(&json!([1])).value_type(), ValueType::Array);
        assert_eq!(Argument::required_string().value_type(), ValueType::String);
    }

    #[test]
    fn test_arguments_preserve_order() {
        let arguments: Arguments = [
            ("name".to_string(), Argument::required()),
            ("owner_id".to_string(), Argument::required()),
            ("isComplete".to_string(), Argument::with_default(json!(false))),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            arguments.names().collect::<Vec<_>>(),
            vec!["name", "owner_id", "isComplete"]
        );
        assert_eq!(arguments.required_names(), vec!["name", "owner_id"]);
        assert!(arguments.contains("isComplete"));
    }

    #[test]
    fn test_function_http_path() {
        let func = FunctionType::new("gameComplete", FunctionKind::Function { handler: None });
        assert_eq!(func.http_path().as_deref(), Some("/gameComplete"));

        let sub = FunctionType::new(
            "subGame",
            FunctionKind::Subscribe {
                topic: "games/{game_id}".into(),
            },
        );
        assert!(sub.http_path().is_none());

        let bridged = FunctionType::new(
            "pubGame",
            FunctionKind::Publish {
                topic: "games/{game_id}".into(),
                http: true,
            },
        );
        assert_eq!(bridged.http_path().as_deref(), Some("/pubGame"));
        assert_eq!(bridged.kind.tag(), "websockets");
    }

    #[test]
    fn test_api_description_defaults() {
        let api = ApiDescription::default();
        assert_eq!(api.title, DEFAULT_TITLE);
        assert_eq!(api.version, DEFAULT_API_VERSION);
        assert_eq!(api.http_functions().count(), 0);
    }
}
