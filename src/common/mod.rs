//! Common utilities shared by the CLI, the executor and the scenario runner

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Parse a `name=value` symbol binding from the command line.
/// The value may itself contain `=`.
pub fn parse_symbol_binding(binding: &str) -> Result<(String, String)> {
    match binding.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(Error::InvalidSymbolBinding(binding.to_string())),
    }
}
