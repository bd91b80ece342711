//! Test scenario configuration types
//!
//! Defines the data structures for deserializing YAML test scenarios.

use serde::Deserialize;
use std::collections::BTreeMap;

/// A complete test scenario loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct TestScenario {
    /// Name of the test scenario
    pub name: String,
    /// Optional description of what the test verifies
    pub description: Option<String>,
    /// Symbols bound before the first step
    #[serde(default)]
    pub symbols: BTreeMap<String, String>,
    /// The sequence of test steps to execute, all in one session
    pub steps: Vec<TestStep>,
}

/// One instruction and what its result should look like
#[derive(Deserialize, Debug)]
pub struct TestStep {
    /// Instruction tokens: id, command, operands
    pub instruction: Vec<String>,
    /// Expected result (exact match)
    pub expect: Option<String>,
    /// Result must be an exception whose text contains this
    pub expect_exception: Option<String>,
}
