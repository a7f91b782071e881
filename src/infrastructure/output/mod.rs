//! Output service implementations

pub mod filesystem_output;
pub mod format;

pub use filesystem_output::*;
pub use format::OutputFormat;
