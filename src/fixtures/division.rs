//! Decision-table style fixture: set inputs, then ask for the quotient

use crate::executor::{method, ConstructError, FixtureError, Handle, MethodResult, StatementExecutor, VOID};

const CLASS: &str = "Division";

#[derive(Debug, Default)]
struct Division {
    numerator: f64,
    denominator: f64,
}

fn construct(_args: &[String]) -> Result<Handle, ConstructError> {
    Ok(Box::new(Division::default()))
}

fn number(args: &[String]) -> Result<f64, FixtureError> {
    let arg = args
        .first()
        .ok_or_else(|| FixtureError::new("A number is required"))?;
    arg.trim()
        .parse()
        .map_err(|_| FixtureError::new(format!("Not a number: {arg}")))
}

fn set_numerator(division: &mut Division, args: &[String]) -> MethodResult {
    division.numerator = number(args)?;
    Ok(VOID.to_string())
}

fn set_denominator(division: &mut Division, args: &[String]) -> MethodResult {
    division.denominator = number(args)?;
    Ok(VOID.to_string())
}

fn quotient(division: &mut Division, _args: &[String]) -> MethodResult {
    if division.denominator == 0.0 {
        return Err(FixtureError::new("Divide by zero"));
    }
    Ok((division.numerator / division.denominator).to_string())
}

pub(super) fn register(executor: &mut StatementExecutor) {
    executor.register_fixture(CLASS, construct);
    executor.register_method(CLASS, "setNumerator", method(set_numerator));
    executor.register_method(CLASS, "setDenominator", method(set_denominator));
    executor.register_method(CLASS, "quotient", method(quotient));
    executor.register_method(
        CLASS,
        "echo",
        method(|_: &mut Division, args: &[String]| Ok(args.join(" "))),
    );
}
