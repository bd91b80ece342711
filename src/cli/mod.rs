//! CLI command handling
//!
//! Builds a session, feeds it the requested input and formats output.

use std::path::Path;

use crate::commands::Commands;
use crate::common::config::{Config, Format};
use crate::common::{parse_symbol_binding, Error, Result};
use crate::executor::{
    decode_instructions, encode_results, Instruction, ListExecutor, StatementExecutor,
    StatementResult,
};
use crate::fixtures;
use crate::testing;

/// Dispatch a CLI command
pub fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run {
            path,
            input,
            output,
            symbols,
        } => {
            let bindings = symbols
                .iter()
                .map(|binding| parse_symbol_binding(binding))
                .collect::<Result<Vec<_>>>()?;
            let instructions = read_batch(&path, input)?;

            let mut executor = new_session(config);
            for (name, value) in &bindings {
                executor.set_symbol(name, value);
            }
            let mut session = ListExecutor::new(executor);

            tracing::info!(count = instructions.len(), "Executing batch");
            let results = session.execute(&instructions);
            let failed = results.iter().filter(|r| r.is_exception()).count();
            tracing::info!(count = results.len(), failed, "Batch complete");

            println!(
                "{}",
                format_results(&results, output.unwrap_or(config.output.format))?
            );
            Ok(())
        }

        Commands::Fixtures => {
            let executor = new_session(config);
            for (name, entry) in executor.fixtures() {
                println!("{}", name);
                for method in entry.method_names() {
                    println!("  {}", method);
                }
            }
            Ok(())
        }

        Commands::Test { path, verbose } => {
            let result = testing::run_scenario(&path, &config.executor, verbose)?;
            if result.passed {
                Ok(())
            } else {
                Err(Error::TestFailed {
                    name: result.name,
                    step: result.steps_run,
                    total: result.steps_total,
                    reason: result.error.unwrap_or_default(),
                })
            }
        }
    }
}

/// Fresh session with the bundled fixtures registered
pub fn new_session(config: &Config) -> StatementExecutor {
    let mut executor = StatementExecutor::with_config(&config.executor);
    fixtures::register_all(&mut executor);
    executor
}

/// Read and decode an instruction batch
pub fn read_batch(path: &Path, format: Format) -> Result<Vec<Instruction>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
    parse_batch(content.trim_end_matches(['\r', '\n']), format)
}

/// Decode an instruction batch from text
pub fn parse_batch(content: &str, format: Format) -> Result<Vec<Instruction>> {
    match format {
        Format::Slim => decode_instructions(content).map_err(Error::from),
        Format::Json => serde_json::from_str(content)
            .map_err(|e| Error::InvalidBatch(format!("expected an array of string arrays: {e}"))),
    }
}

/// Encode results in the requested format
pub fn format_results(results: &[StatementResult], format: Format) -> Result<String> {
    match format {
        Format::Slim => Ok(encode_results(results)),
        Format::Json => {
            let pairs: Vec<[&str; 2]> = results
                .iter()
                .map(|r| [r.id.as_str(), r.result.as_str()])
                .collect();
            Ok(serde_json::to_string(&pairs)?)
        }
    }
}
