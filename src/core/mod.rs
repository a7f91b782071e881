//! Core configuration, errors and string utilities

pub mod config;
pub mod error;
pub mod utils;

pub use config::{Config, ConfigOverrides};
pub use error::{Error, Result, ValidationError};
