//! OpenAPI 3.0 output

pub mod emitter;

pub use emitter::{OPENAPI_VERSION, OpenApiEmitter};
