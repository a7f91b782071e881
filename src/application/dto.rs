//! Data returned by application use cases

/// Summary of a finished conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertResponse {
    /// Functions read from the input
    pub functions_count: usize,
    /// Functions exposed as HTTP endpoints in the output
    pub endpoints_count: usize,
    pub output_path: String,
}
