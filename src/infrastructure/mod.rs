//! Infrastructure layer - concrete implementations of domain ports

pub mod crossover;
pub mod factory;
pub mod javascript;
pub mod openapi;
pub mod output;
pub mod source;
pub mod swagger;

pub use factory::default_dispatcher;
