//! Format-neutral plan of the HTTP endpoints an API description exposes
//!
//! Emitters walk the plan and translate each [`Shape`] into their own schema
//! type, so the request and response rules live in one place.

use indexmap::IndexMap;
use serde_json::{Value as JsonValue, json};

use crate::conversion::{ApiDescription, Argument, Arguments, FunctionKind, FunctionType, ValueType};
use crate::core::utils::humanize;

/// Structure of a JSON payload
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Any,
    String,
    Integer,
    Number,
    Boolean,
    Array(Box<Shape>),
    Object(ObjectShape),
}

/// Properties of an object payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    pub properties: IndexMap<String, Property>,
    pub required: Vec<String>,
    /// Whether undeclared properties may appear
    pub open: bool,
}

/// One property of an object payload
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub shape: Shape,
    pub default: Option<JsonValue>,
    pub description: Option<String>,
}

impl Property {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            default: None,
            description: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Shape {
    pub fn object<I>(properties: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Property)>,
    {
        let properties: IndexMap<String, Property> = properties
            .into_iter()
            .map(|(name, prop)| (name.to_string(), prop))
            .collect();
        let required = properties.keys().cloned().collect();
        Shape::Object(ObjectShape {
            properties,
            required,
            open: false,
        })
    }

    /// Shape of a value with the given JSON type
    pub fn of_type(value_type: ValueType) -> Self {
        match value_type {
            ValueType::String => Shape::String,
            ValueType::Integer => Shape::Integer,
            ValueType::Number => Shape::Number,
            ValueType::Boolean => Shape::Boolean,
            ValueType::Array => Shape::Array(Box::new(Shape::Any)),
            ValueType::Object => Shape::Object(ObjectShape {
                open: true,
                ..Default::default()
            }),
            ValueType::Unknown => Shape::Any,
        }
    }

    /// Object shape with one property per argument
    pub fn from_arguments(arguments: &Arguments) -> Self {
        let properties = arguments
            .iter()
            .map(|(name, argument)| (name.clone(), argument_property(argument)))
            .collect();
        Shape::Object(ObjectShape {
            properties,
            required: arguments.required_names(),
            open: false,
        })
    }
}

fn argument_property(argument: &Argument) -> Property {
    Property {
        shape: Shape::of_type(argument.value_type()),
        default: argument.default.clone(),
        description: None,
    }
}

/// A response an endpoint can produce
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub description: String,
    pub shape: Shape,
}

/// A `POST` endpoint derived from one function
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint<'a> {
    pub function: &'a FunctionType,
    pub path: String,
    pub tag: &'static str,
    pub summary: String,
    pub description: Option<String>,
    /// Request body, absent when the function takes no arguments
    pub request: Option<Shape>,
    pub responses: Vec<EndpointResponse>,
}

/// Plan an endpoint for every HTTP-reachable function, in declaration order
pub fn plan_endpoints(api: &ApiDescription) -> Vec<Endpoint<'_>> {
    api.functions
        .iter()
        .filter_map(|function| plan_endpoint(api, function))
        .collect()
}

fn plan_endpoint<'a>(api: &ApiDescription, function: &'a FunctionType) -> Option<Endpoint<'a>> {
    let path = function.http_path()?;

    let (request, responses, generated) = match &function.kind {
        FunctionKind::Function { handler } => (
            body_from_arguments(&function.arguments),
            vec![
                ok("Value returned by the function", Shape::Any),
                failure("Function raised an error", "message"),
            ],
            handler
                .as_ref()
                .filter(|h| *h != &function.name)
                .map(|h| format!("Calls server function `{h}`.")),
        ),
        FunctionKind::Database {
            engine,
            method,
            table,
            query,
        } => {
            let rows = Shape::Array(Box::new(Shape::of_type(ValueType::Object)));
            let target = table
                .as_ref()
                .map(|t| format!(" on table `{t}`"))
                .unwrap_or_default();
            let mut text = format!("Runs a {engine} {method} statement{target}.");
            if let Some(query) = query {
                text.push_str(&format!("\n\n```sql\n{query}\n```"));
            }
            (
                body_from_arguments(&function.arguments),
                vec![
                    ok("Rows returned by the statement", rows),
                    failure("Statement failed", "error"),
                ],
                Some(text),
            )
        }
        FunctionKind::Publish { topic, .. } => {
            let body = Shape::object([
                (
                    "args",
                    Property::new(Shape::from_arguments(&function.arguments))
                        .describe(format!("Values for the placeholders of topic `{topic}`")),
                ),
                (
                    "message",
                    Property::new(Shape::String).describe("Payload to publish"),
                ),
            ]);
            let published = Shape::object([("success", Property::new(Shape::Boolean))]);
            let broker = api
                .broker_url
                .as_ref()
                .map(|url| format!(" on broker `{url}`"))
                .unwrap_or_default();
            (
                Some(body),
                vec![
                    ok("Message was handed to the broker", published),
                    failure("Publishing failed", "message"),
                ],
                Some(format!("Publishes `message` to MQTT topic `{topic}`{broker}.")),
            )
        }
        FunctionKind::Subscribe { .. } => return None,
    };

    let description = match (&function.description, generated) {
        (Some(own), Some(generated)) => Some(format!("{own}\n\n{generated}")),
        (Some(own), None) => Some(own.clone()),
        (None, generated) => generated,
    };

    Some(Endpoint {
        function,
        path,
        tag: function.kind.tag(),
        summary: humanize(&function.name),
        description,
        request,
        responses,
    })
}

/// MQTT operations the HTTP endpoints cannot express, for the
/// `x-crossover-mqtt` extension. `None` when every function is reachable over HTTP.
pub fn mqtt_operations(api: &ApiDescription) -> Option<JsonValue> {
    let operations: Vec<JsonValue> = api
        .functions
        .iter()
        .filter(|f| !f.kind.is_http())
        .filter_map(|function| {
            let (operation, topic) = match &function.kind {
                FunctionKind::Publish { topic, .. } => ("publish", topic),
                FunctionKind::Subscribe { topic } => ("subscribe", topic),
                _ => return None,
            };
            Some(json!({
                "name": function.name,
                "operation": operation,
                "topic": topic,
                "arguments": function.arguments.names().collect::<Vec<_>>(),
            }))
        })
        .collect();

    if operations.is_empty() {
        return None;
    }

    let mut extension = json!({ "operations": operations });
    if let Some(broker) = &api.broker_url {
        extension["broker"] = json!(broker);
    }
    Some(extension)
}

/// Description of each tag used by the endpoints, in first-use order
pub fn endpoint_tags(endpoints: &[Endpoint<'_>]) -> Vec<(&'static str, &'static str)> {
    let mut tags: Vec<(&'static str, &'static str)> = Vec::new();
    for endpoint in endpoints {
        if tags.iter().any(|(name, _)| *name == endpoint.tag) {
            continue;
        }
        let description = match endpoint.tag {
            "functions" => "Server-side JavaScript functions",
            "database" => "Database statements",
            _ => "MQTT messages bridged over HTTP",
        };
        tags.push((endpoint.tag, description));
    }
    tags
}

fn body_from_arguments(arguments: &Arguments) -> Option<Shape> {
    (!arguments.is_empty()).then(|| Shape::from_arguments(arguments))
}

fn ok(description: &str, shape: Shape) -> EndpointResponse {
    EndpointResponse {
        status: 200,
        description: description.to_string(),
        shape,
    }
}

fn failure(description: &str, field: &'static str) -> EndpointResponse {
    EndpointResponse {
        status: 500,
        description: description.to_string(),
        shape: Shape::object([(field, Property::new(Shape::String))]),
    }
}
