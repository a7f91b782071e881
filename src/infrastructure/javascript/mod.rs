//! JavaScript config module reader

pub mod lexer;
pub mod parser;

pub use parser::{parse_literal, parse_module_exports};
