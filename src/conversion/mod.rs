//! Conversion domain - turns an input API description into an output document
//!
//! Loaders read an input format into an [`ApiDescription`], a list of
//! [`FunctionType`] records. Emitters render that description in an output
//! format. The [`Dispatcher`] picks both by format tag.

pub mod dispatcher;
pub mod endpoint;
pub mod errors;
pub mod rules;
pub mod traits;
pub mod types;

pub use dispatcher::*;
pub use endpoint::*;
pub use errors::*;
pub use traits::*;
pub use types::*;
