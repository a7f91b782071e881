//! Swagger 2.0 output

pub mod emitter;
pub mod model;

pub use emitter::{MQTT_EXTENSION, SwaggerEmitter};
pub use model::SwaggerDocument;
