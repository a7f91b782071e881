//! Source readers for input documents

pub mod composite_source;
pub mod file_source;
pub mod http_source;

pub use composite_source::CompositeSourceReader;
pub use file_source::FileSourceReader;
pub use http_source::HttpSourceReader;
