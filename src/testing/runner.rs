//! Test runner implementation
//!
//! Executes scenario steps one instruction at a time against a single
//! session and checks each result against its expectation.

use std::path::Path;

use colored::Colorize;

use crate::common::config::ExecutorConfig;
use crate::common::{Error, Result};
use crate::executor::{is_exception, ListExecutor, StatementExecutor, StatementResult};
use crate::fixtures;

use super::config::{TestScenario, TestStep};

/// Result of a test run
#[derive(Debug)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub error: Option<String>,
}

/// Load a scenario from a YAML file
pub fn load_scenario(path: &Path) -> Result<TestScenario> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read test scenario '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse test scenario: {}", e)))
}

/// Run a test scenario from a YAML file
pub fn run_scenario(path: &Path, config: &ExecutorConfig, verbose: bool) -> Result<TestResult> {
    let scenario = load_scenario(path)?;
    Ok(run(scenario, config, verbose))
}

/// Run an already loaded scenario in a fresh session with the bundled fixtures
pub fn run(scenario: TestScenario, config: &ExecutorConfig, verbose: bool) -> TestResult {
    let steps_total = scenario.steps.len();

    println!(
        "\n{} {}",
        "Running Test:".blue().bold(),
        scenario.name.white().bold()
    );

    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }

    let mut executor = StatementExecutor::with_config(config);
    fixtures::register_all(&mut executor);
    for (name, value) in &scenario.symbols {
        executor.set_symbol(name, value);
    }
    let mut session = ListExecutor::new(executor);

    println!("\n{}", "Steps:".cyan());

    for (i, step) in scenario.steps.iter().enumerate() {
        let step_num = i + 1;

        let results = session.execute(std::slice::from_ref(&step.instruction));
        let outcome = match results.first() {
            Some(result) => check_step(step, result),
            None => Err(Error::TestAssertion("no result produced".to_string())),
        };

        match outcome {
            Ok(()) => {
                if verbose {
                    println!(
                        "  {} Step {}: {}",
                        "✓".green(),
                        step_num,
                        step.instruction.join(" ").dimmed()
                    );
                }
            }
            Err(e) => {
                println!("  {} Step {}: {}", "✗".red(), step_num, e);

                return TestResult {
                    name: scenario.name,
                    passed: false,
                    steps_run: step_num,
                    steps_total,
                    error: Some(match e {
                        Error::TestAssertion(reason) => reason,
                        other => other.to_string(),
                    }),
                };
            }
        }
    }

    println!(
        "\n{} {}\n",
        "✓".green().bold(),
        "Test Passed".green().bold()
    );

    TestResult {
        name: scenario.name,
        passed: true,
        steps_run: steps_total,
        steps_total,
        error: None,
    }
}

fn check_step(step: &TestStep, result: &StatementResult) -> Result<()> {
    if let Some(expected) = &step.expect {
        if &result.result != expected {
            return Err(Error::TestAssertion(format!(
                "[{}] expected '{}', got '{}'",
                result.id, expected, result.result
            )));
        }
    }

    if let Some(fragment) = &step.expect_exception {
        if !is_exception(&result.result) || !result.result.contains(fragment.as_str()) {
            return Err(Error::TestAssertion(format!(
                "[{}] expected an exception containing '{}', got '{}'",
                result.id, fragment, result.result
            )));
        }
    }

    Ok(())
}
