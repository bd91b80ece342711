//! Fixture demonstrating constructor and method failures

use crate::executor::{method, ConstructError, FixtureError, Handle, StatementExecutor};

const CLASS: &str = "ExceptionsExample";

struct ExceptionsExample;

fn construct(args: &[String]) -> Result<Handle, ConstructError> {
    if args.is_empty() {
        return Err(ConstructError::new("One arg required"));
    }
    Ok(Box::new(ExceptionsExample))
}

pub(super) fn register(executor: &mut StatementExecutor) {
    executor.register_fixture(CLASS, construct);
    executor.register_method(
        CLASS,
        "setTrouble",
        method(|_: &mut ExceptionsExample, _args: &[String]| Err(FixtureError::new("You stink"))),
    );
}
