//! Application layer - orchestrates use cases and coordinates between domains

pub mod convert;
pub mod dto;
pub mod errors;
pub mod traits;

pub use convert::ConvertUseCase;
pub use dto::*;
pub use errors::*;
pub use traits::*;
