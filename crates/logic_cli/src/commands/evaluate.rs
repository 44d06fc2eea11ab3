//! evaluate subcommand handler.
//!
//! Scores every response of a generation file: consecutive step pairs are
//! checked against each other and every step against the first line of the
//! matching dataset record's `symbolic_reasoning`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use logic_ast::VariableSet;
use logic_reasoning::{ReasoningValidator, RunSummary, ValidationReport};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::EvalConfig;

/// Arguments for evaluate subcommand
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Generation file: JSON object mapping response id to model output
    #[arg(long)]
    pub output_path: PathBuf,

    /// Dataset file: one JSON record per line
    #[arg(long)]
    pub data: PathBuf,

    /// Variable alphabet as a comma-separated list (overrides config)
    #[arg(long)]
    pub variables: Option<VariableSet>,

    /// How response ids select dataset records
    #[arg(long, value_enum, default_value_t = KeyMode::Index)]
    pub key_mode: KeyMode,

    /// Also write the summary and per-response tallies as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Print every false step pair and ground-truth check
    #[arg(long, default_value_t = false)]
    pub details: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyMode {
    /// Response id is the 0-based line number in the dataset
    Index,
    /// Response id matches the record's `id` field
    Id,
}

#[derive(Debug, Deserialize)]
struct DatasetRecord {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    symbolic_reasoning: Option<String>,
}

impl DatasetRecord {
    fn ground_truth(&self) -> Option<&str> {
        self.symbolic_reasoning
            .as_deref()
            .and_then(|s| s.split('\n').next())
    }

    fn id_key(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

struct Dataset {
    records: Vec<Option<DatasetRecord>>,
    by_id: HashMap<String, usize>,
}

impl Dataset {
    fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading dataset {}", path.display()))?;

        let mut records = Vec::new();
        let mut by_id = HashMap::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                records.push(None);
                continue;
            }
            match serde_json::from_str::<DatasetRecord>(line) {
                Ok(record) => {
                    if let Some(id) = record.id_key() {
                        by_id.insert(id, line_no);
                    }
                    records.push(Some(record));
                }
                Err(e) => {
                    tracing::warn!(line = line_no, error = %e, "skipping malformed dataset record");
                    records.push(None);
                }
            }
        }
        Ok(Dataset { records, by_id })
    }

    fn ground_truth(&self, key: &str, mode: KeyMode) -> Option<&str> {
        let line = match mode {
            KeyMode::Index => key.trim().parse::<usize>().ok()?,
            KeyMode::Id => *self.by_id.get(key)?,
        };
        self.records.get(line)?.as_ref()?.ground_truth()
    }
}

/// Responses in id order: numeric when every id is an integer, otherwise
/// lexicographic.
fn load_generation(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading generation file {}", path.display()))?;
    let generation: BTreeMap<String, String> = serde_json::from_str(&content)
        .with_context(|| format!("parsing generation file {}", path.display()))?;

    let mut responses: Vec<(String, String)> = generation.into_iter().collect();
    let numeric: Option<Vec<u64>> = responses
        .iter()
        .map(|(key, _)| key.trim().parse::<u64>().ok())
        .collect();
    if let Some(ids) = numeric {
        let mut keyed: Vec<_> = ids.into_iter().zip(responses).collect();
        keyed.sort_by_key(|(id, _)| *id);
        responses = keyed.into_iter().map(|(_, entry)| entry).collect();
    }
    Ok(responses)
}

// Serializes as a JSON object, keeping response order.
struct ResponseReports<'a>(&'a [(String, ValidationReport)]);

impl Serialize for ResponseReports<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, report)| (key, report)))
    }
}

#[derive(Serialize)]
struct EvaluationJson<'a> {
    summary: &'a RunSummary,
    responses: ResponseReports<'a>,
}

fn print_details(key: &str, report: &ValidationReport) {
    for pair in report.pairs.iter().filter(|p| p.verdict.counts_as_false()) {
        println!("[{}] step {} → step {}: {}", key, pair.left, pair.right, pair.verdict);
    }
    for check in report.checks.iter().filter(|c| c.verdict.counts_as_false()) {
        println!("[{}] step {} vs ground truth: {}", key, check.step, check.verdict);
    }
}

pub fn run(args: EvaluateArgs, config: &EvalConfig) -> Result<()> {
    let variables = args.variables.unwrap_or_else(|| config.variables.clone());
    let extractor = config.extractor()?;
    let generation = load_generation(&args.output_path)?;
    let dataset = Dataset::load(&args.data)?;

    tracing::info!(
        responses = generation.len(),
        records = dataset.records.len(),
        variables = %variables,
        "evaluating"
    );

    let mut validator = ReasoningValidator::new(variables);
    let mut reports = Vec::with_capacity(generation.len());
    for (key, text) in &generation {
        let steps = extractor.extract_texts(text);
        let truth = dataset.ground_truth(key, args.key_mode);
        if truth.is_none() {
            tracing::warn!(key = %key, "no ground truth for response; scoring pairs only");
            validator.note_missing_ground_truth();
        }

        let report = validator.validate_and_record(&steps, truth);
        if args.details {
            print_details(key, &report);
        }
        reports.push((key.clone(), report));
    }

    let summary = validator.summary();
    println!("{}", summary);
    if summary.responses_without_steps > 0 || summary.missing_ground_truth > 0 {
        println!(
            "Responses: {} (without reasoning steps: {}, without ground truth: {})",
            summary.responses, summary.responses_without_steps, summary.missing_ground_truth
        );
    }
    if summary.pairwise.parse_failures > 0 || summary.ground_truth.parse_failures > 0 {
        println!(
            "Unparseable: {} step pairs, {} ground-truth checks",
            summary.pairwise.parse_failures, summary.ground_truth.parse_failures
        );
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&EvaluationJson {
            summary,
            responses: ResponseReports(&reports),
        })?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
