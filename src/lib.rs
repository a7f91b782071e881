//! Converts crossover route configurations into Swagger 2.0 and OpenAPI 3.0
//! documents.
//!
//! The crate is layered the same way as its binary uses it:
//! - [`core`]: converter configuration and shared utilities
//! - [`conversion`]: the format-neutral API description, loader and emitter
//!   ports, and the [`conversion::Dispatcher`] that selects them by tag
//! - [`infrastructure`]: concrete readers, loaders, emitters and output
//! - [`application`]: the convert use case tying them together
#![deny(unsafe_code)]

pub mod application;
pub mod conversion;
pub mod core;
pub mod infrastructure;
