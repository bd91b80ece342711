//! CLI command definitions
//!
//! Defines the clap commands for the Slim runner.

use clap::Subcommand;
use std::path::PathBuf;

use crate::common::config::Format;

#[derive(Subcommand)]
pub enum Commands {
    /// Execute an instruction batch and print the results
    Run {
        /// File holding the batch
        path: PathBuf,

        /// Batch encoding
        #[arg(long, value_enum, default_value = "slim")]
        input: Format,

        /// Result encoding (default from config, else slim)
        #[arg(long, value_enum)]
        output: Option<Format>,

        /// Bind a symbol before execution: --set name=value
        /// Can be specified multiple times
        #[arg(long = "set", short = 's')]
        symbols: Vec<String>,
    },

    /// List fixture classes and their methods
    Fixtures,

    /// Execute a test scenario defined in a YAML file
    Test {
        /// Path to the YAML test scenario file
        path: PathBuf,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },
}
