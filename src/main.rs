//! Slim runner - executes Slim instruction batches against bundled fixtures

use std::path::PathBuf;

use clap::Parser;
use slim::common::{config::Config, logging};
use slim::{cli, commands::Commands};

#[derive(Parser)]
#[command(name = "slim-runner", about = "Slim statement executor")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every dispatched instruction
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.debug);

    let result = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .and_then(|config| cli::dispatch(cli.command, &config));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
