//! Demo fixtures registered at session start

mod division;
mod exceptions_example;

use crate::executor::StatementExecutor;

/// Register every bundled fixture class
pub fn register_all(executor: &mut StatementExecutor) {
    exceptions_example::register(executor);
    division::register(executor);
}
