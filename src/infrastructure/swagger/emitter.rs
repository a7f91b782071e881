//! Swagger 2.0 emitter

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::conversion::{
    ApiDescription, ConversionError, Endpoint, OutputEmitter, Shape, endpoint_tags,
    mqtt_operations, plan_endpoints,
};
use crate::infrastructure::swagger::model::{
    Info, Operation, Parameter, PathItem, Response, SWAGGER_VERSION, SchemaObject, SwaggerDocument,
    Tag,
};

const JSON_MEDIA_TYPE: &str = "application/json";

/// Extension holding the MQTT operations Swagger cannot describe
pub const MQTT_EXTENSION: &str = "x-crossover-mqtt";

/// Renders an [`ApiDescription`] as a Swagger 2.0 document
#[derive(Debug, Default, Clone, Copy)]
pub struct SwaggerEmitter;

impl SwaggerEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Build the typed document
    pub fn document(&self, api: &ApiDescription) -> Result<SwaggerDocument, ConversionError> {
        let endpoints = plan_endpoints(api);

        let mut document = SwaggerDocument {
            swagger: SWAGGER_VERSION.to_string(),
            info: Info {
                title: api.title.clone(),
                version: api.version.clone(),
                description: api.description.clone(),
            },
            host: None,
            base_path: None,
            schemes: Vec::new(),
            consumes: vec![JSON_MEDIA_TYPE.to_string()],
            produces: vec![JSON_MEDIA_TYPE.to_string()],
            tags: endpoint_tags(&endpoints)
                .into_iter()
                .map(|(name, description)| Tag {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                })
                .collect(),
            paths: IndexMap::new(),
            extensions: IndexMap::new(),
        };

        if let Some(base_url) = &api.base_url {
            apply_base_url(&mut document, base_url)?;
        }

        for endpoint in &endpoints {
            document.paths.insert(
                endpoint.path.clone(),
                PathItem {
                    post: Some(operation(endpoint)),
                },
            );
        }

        if let Some(mqtt) = mqtt_operations(api) {
            document.extensions.insert(MQTT_EXTENSION.to_string(), mqtt);
        }

        debug!(paths = document.paths.len(), "Built Swagger document");
        Ok(document)
    }
}

impl OutputEmitter for SwaggerEmitter {
    fn emit(&self, api: &ApiDescription) -> Result<JsonValue, ConversionError> {
        let document = self.document(api)?;
        Ok(serde_json::to_value(document)?)
    }
}

/// Split the client base URL into `host`, `basePath` and `schemes`
fn apply_base_url(document: &mut SwaggerDocument, base_url: &str) -> Result<(), ConversionError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConversionError::EmitError(format!("invalid base URL '{base_url}': {e}")))?;

    if let Some(host) = url.host_str() {
        document.host = Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        });
    }
    document.base_path = Some(url.path().to_string());
    document.schemes = vec![url.scheme().to_string()];
    Ok(())
}

fn operation(endpoint: &Endpoint<'_>) -> Operation {
    let parameters = endpoint
        .request
        .as_ref()
        .map(|shape| Parameter {
            name: "body".to_string(),
            location: "body".to_string(),
            description: Some("Arguments of the call".to_string()),
            required: true,
            schema: schema(shape),
        })
        .into_iter()
        .collect();

    let responses = endpoint
        .responses
        .iter()
        .map(|response| {
            let schema = match response.shape {
                Shape::Any => None,
                ref shape => Some(schema(shape)),
            };
            (
                response.status.to_string(),
                Response {
                    description: response.description.clone(),
                    schema,
                },
            )
        })
        .collect();

    Operation {
        tags: vec![endpoint.tag.to_string()],
        summary: Some(endpoint.summary.clone()),
        description: endpoint.description.clone(),
        operation_id: endpoint.function.name.clone(),
        parameters,
        responses,
    }
}

fn schema(shape: &Shape) -> SchemaObject {
    match shape {
        Shape::Any => SchemaObject::default(),
        Shape::String => SchemaObject::typed("string"),
        Shape::Integer => SchemaObject::typed("integer"),
        Shape::Number => SchemaObject::typed("number"),
        Shape::Boolean => SchemaObject::typed("boolean"),
        Shape::Array(items) => SchemaObject {
            items: Some(Box::new(schema(items))),
            ..SchemaObject::typed("array")
        },
        Shape::Object(object) => SchemaObject {
            properties: object
                .properties
                .iter()
                .map(|(name, property)| {
                    let mut prop = schema(&property.shape);
                    prop.default = property.default.clone();
                    prop.description = property.description.clone();
                    (name.clone(), prop)
                })
                .collect(),
            required: object.required.clone(),
            additional_properties: object.open.then_some(true),
            ..SchemaObject::typed("object")
        },
    }
}
