//! Scenario test runner
//!
//! Reads YAML scenarios (instructions plus expected results) and runs them
//! against a fresh session with the bundled fixtures.

mod config;
mod runner;

pub use config::*;
pub use runner::{load_scenario, run, run_scenario, TestResult};
