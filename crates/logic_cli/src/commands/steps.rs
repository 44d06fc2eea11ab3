//! steps subcommand handler.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::EvalConfig;

#[derive(Args, Debug)]
pub struct StepsArgs {
    /// File holding one model response (stdin when omitted)
    pub input: Option<PathBuf>,
}

pub fn run(args: StepsArgs, config: &EvalConfig) -> Result<()> {
    let text = match &args.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => io::read_to_string(io::stdin()).context("reading stdin")?,
    };

    let steps = config.extractor()?.extract(&text);
    if steps.is_empty() {
        println!("No reasoning steps found.");
        return Ok(());
    }
    for step in steps {
        println!("step {}: {}", step.index, step.text);
    }
    Ok(())
}
