//! Slim statement execution
//!
//! [`ListExecutor`] validates and routes instruction batches,
//! [`StatementExecutor`] holds the session (fixture classes, instances and
//! symbols) and performs `make`/`call`, and [`SymbolTable`] substitutes
//! `$symbol` references in operands before each dispatch.

mod exception;
pub mod fixture;
mod list;
mod statement;
mod symbols;

pub use exception::{is_exception, Exception, EXCEPTION_PREFIX, EXCEPTION_SUFFIX};
pub use fixture::{
    method, ConstructError, Fixture, FixtureEntry, FixtureError, Handle, Method, MethodResult,
    NullFixture,
};
pub use list::{decode_instructions, encode_results, Instruction, ListExecutor, StatementResult, OK, VOID};
pub use statement::StatementExecutor;
pub use symbols::{SymbolTable, SYMBOL_MARKER};
