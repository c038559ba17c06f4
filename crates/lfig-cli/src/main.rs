use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;

use clap::{Parser, Subcommand};
use commands::{
    combine::{self, CombineArgs},
    distributions::{self, DistributionsArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "lfig", about = "Lineage figure post-processing")]
struct Cli {
    /// Emit debug diagnostics on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pair coalescent tree and spatial mapping figures side by side.
    Combine(CombineArgs),
    /// Regenerate the spatial metric distribution plots from a results file.
    Distributions(DistributionsArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Combine(args) => combine::run(&args),
        Command::Distributions(args) => distributions::run(&args),
    }
}

pub(crate) fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
