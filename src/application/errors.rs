//! Application layer error types

use thiserror::Error;

use crate::conversion::ConversionError;
use crate::core::ValidationError;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
