//! Error types for the Slim runner
//!
//! Two layers of failure exist. Instruction-level failures never escape the
//! executor: they are rendered as sentinel exception strings and returned as
//! that instruction's result (see [`crate::executor::Exception`]). Everything
//! around the executor (config loading, reading batches, scenarios) uses the
//! [`Error`] type below.

use std::io;
use thiserror::Error;

use crate::codec::CodecError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Slim runner
#[derive(Error, Debug)]
pub enum Error {
    // === Batch Errors ===
    #[error("Invalid instruction batch: {0}")]
    InvalidBatch(String),

    #[error("Slim list codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Invalid symbol binding '{0}'. Expected name=value")]
    InvalidSymbolBinding(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Test Errors ===
    #[error("Test assertion failed: {0}")]
    TestAssertion(String),

    #[error("Test '{name}' failed at step {step}/{total}: {reason}")]
    TestFailed {
        name: String,
        step: usize,
        total: usize,
        reason: String,
    },
}

impl Error {
    /// Create a file read error for the given path
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
