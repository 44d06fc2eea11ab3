//! compare subcommand handler.

use anyhow::{Context, Result};
use clap::Args;
use logic_ast::VariableSet;
use logic_parser::parse;

use crate::config::EvalConfig;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First expression, e.g. "A → B"
    pub left: String,

    /// Second expression, e.g. "¬A ∨ B"
    pub right: String,

    /// Variable alphabet as a comma-separated list (overrides config)
    #[arg(long)]
    pub variables: Option<VariableSet>,
}

pub fn run(args: CompareArgs, config: &EvalConfig) -> Result<()> {
    let vars = args.variables.unwrap_or_else(|| config.variables.clone());

    let left = parse(&args.left, &vars)
        .with_context(|| format!("parsing left expression '{}'", args.left))?;
    let right = parse(&args.right, &vars)
        .with_context(|| format!("parsing right expression '{}'", args.right))?;

    let cmp = logic_engine::compare(&left, &right)?;

    println!("Left:  {}", left);
    println!("  DNF: {}", cmp.lhs);
    println!("Right: {}", right);
    println!("  DNF: {}", cmp.rhs);
    if cmp.equivalent {
        println!("Verdict: equivalent");
    } else {
        println!("Verdict: not equivalent");
        if let Some(assignment) = &cmp.counterexample {
            println!("Counterexample: {}", assignment);
        }
    }
    Ok(())
}
