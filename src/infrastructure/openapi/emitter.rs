//! OpenAPI 3.0 emitter built on the `openapiv3` document types

use indexmap::IndexMap;
use openapiv3::{
    AdditionalProperties, AnySchema, ArrayType, BooleanType, Info, IntegerType, MediaType,
    NumberType, ObjectType, OpenAPI, Operation, PathItem, Paths, ReferenceOr, RequestBody,
    Response, Responses, Schema, SchemaData, SchemaKind, Server, StatusCode, StringType, Tag, Type,
};
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::conversion::{
    ApiDescription, ConversionError, Endpoint, OutputEmitter, Shape, endpoint_tags,
    mqtt_operations, plan_endpoints,
};
use crate::infrastructure::swagger::MQTT_EXTENSION;

pub const OPENAPI_VERSION: &str = "3.0.3";

const JSON_MEDIA_TYPE: &str = "application/json";

/// Renders an [`ApiDescription`] as an OpenAPI 3.0 document
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenApiEmitter;

impl OpenApiEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn document(&self, api: &ApiDescription) -> Result<OpenAPI, ConversionError> {
        let endpoints = plan_endpoints(api);

        let servers = match &api.base_url {
            Some(base_url) => {
                Url::parse(base_url).map_err(|e| {
                    ConversionError::EmitError(format!("invalid base URL '{base_url}': {e}"))
                })?;
                vec![Server {
                    url: base_url.trim_end_matches('/').to_string(),
                    ..Default::default()
                }]
            }
            None => Vec::new(),
        };

        let mut paths = Paths::default();
        for endpoint in &endpoints {
            paths.paths.insert(
                endpoint.path.clone(),
                ReferenceOr::Item(PathItem {
                    post: Some(operation(endpoint)),
                    ..Default::default()
                }),
            );
        }

        let mut extensions = IndexMap::new();
        if let Some(mqtt) = mqtt_operations(api) {
            extensions.insert(MQTT_EXTENSION.to_string(), mqtt);
        }

        let document = OpenAPI {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: api.title.clone(),
                version: api.version.clone(),
                description: api.description.clone(),
                ..Default::default()
            },
            servers,
            paths,
            tags: endpoint_tags(&endpoints)
                .into_iter()
                .map(|(name, description)| Tag {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    ..Default::default()
                })
                .collect(),
            extensions,
            ..Default::default()
        };

        debug!(paths = document.paths.paths.len(), "Built OpenAPI document");
        Ok(document)
    }
}

impl OutputEmitter for OpenApiEmitter {
    fn emit(&self, api: &ApiDescription) -> Result<JsonValue, ConversionError> {
        let document = self.document(api)?;
        Ok(serde_json::to_value(document)?)
    }
}

fn json_content(shape: &Shape) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(
        JSON_MEDIA_TYPE.to_string(),
        MediaType {
            schema: Some(ReferenceOr::Item(schema(shape))),
            ..Default::default()
        },
    );
    content
}

fn operation(endpoint: &Endpoint<'_>) -> Operation {
    let request_body = endpoint.request.as_ref().map(|shape| {
        ReferenceOr::Item(RequestBody {
            description: Some("Arguments of the call".to_string()),
            content: json_content(shape),
            required: true,
            ..Default::default()
        })
    });

    let mut responses = Responses::default();
    for response in &endpoint.responses {
        responses.responses.insert(
            StatusCode::Code(response.status),
            ReferenceOr::Item(Response {
                description: response.description.clone(),
                content: json_content(&response.shape),
                ..Default::default()
            }),
        );
    }

    Operation {
        tags: vec![endpoint.tag.to_string()],
        summary: Some(endpoint.summary.clone()),
        description: endpoint.description.clone(),
        operation_id: Some(endpoint.function.name.clone()),
        request_body,
        responses,
        ..Default::default()
    }
}

fn typed(kind: Type) -> Schema {
    Schema {
        schema_data: SchemaData::default(),
        schema_kind: SchemaKind::Type(kind),
    }
}

fn schema(shape: &Shape) -> Schema {
    match shape {
        Shape::Any => Schema {
            schema_data: SchemaData::default(),
            schema_kind: SchemaKind::Any(AnySchema::default()),
        },
        Shape::String => typed(Type::String(StringType::default())),
        Shape::Integer => typed(Type::Integer(IntegerType::default())),
        Shape::Number => typed(Type::Number(NumberType::default())),
        Shape::Boolean => typed(Type::Boolean(BooleanType::default())),
        Shape::Array(items) => typed(Type::Array(ArrayType {
            items: Some(ReferenceOr::Item(Box::new(schema(items)))),
            min_items: None,
            max_items: None,
            unique_items: false,
        })),
        Shape::Object(object) => {
            let properties = object
                .properties
                .iter()
                .map(|(name, property)| {
                    let mut prop = schema(&property.shape);
                    prop.schema_data.default = property.default.clone();
                    prop.schema_data.description = property.description.clone();
                    (name.clone(), ReferenceOr::Item(Box::new(prop)))
                })
                .collect();
            typed(Type::Object(ObjectType {
                properties,
                required: object.required.clone(),
                additional_properties: object.open.then_some(AdditionalProperties::Any(true)),
                ..Default::default()
            }))
        }
    }
}
