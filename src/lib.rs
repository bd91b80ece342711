//! Slim runner - statement-execution core of the Slim test-fixture protocol
//!
//! Interprets batches of `(id, command, operands)` instructions, resolves
//! `$symbol` references in operands, dispatches to registered fixtures and
//! returns one `(id, result)` pair per instruction.

pub mod cli;
pub mod codec;
pub mod commands;
pub mod common;
pub mod executor;
pub mod fixtures;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use executor::{ListExecutor, StatementExecutor, StatementResult};
