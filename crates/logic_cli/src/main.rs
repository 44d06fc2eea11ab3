mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::compare::CompareArgs;
use commands::evaluate::EvaluateArgs;
use commands::steps::StepsArgs;
use config::EvalConfig;

#[derive(Parser, Debug)]
#[command(
    name = "symeval",
    version,
    about = "Check step-by-step symbolic logic derivations for validity"
)]
struct Cli {
    /// Config file (default: ./symeval.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every response of a generation file against a dataset
    Evaluate(EvaluateArgs),
    /// Check whether two expressions are logically equivalent
    Compare(CompareArgs),
    /// Print the reasoning steps extracted from a response
    Steps(StepsArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EvalConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Evaluate(args) => commands::evaluate::run(args, &config),
        Command::Compare(args) => commands::compare::run(args, &config),
        Command::Steps(args) => commands::steps::run(args, &config),
    }
}
