use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use logic_ast::VariableSet;
use logic_reasoning::steps::{STEP_LABEL, THINK_CLOSE, THINK_OPEN};
use logic_reasoning::{ReasoningError, StepExtractor};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "symeval.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub variables: VariableSet,
    pub think_open: String,
    pub think_close: String,
    pub step_label: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            variables: VariableSet::default(),
            think_open: THINK_OPEN.to_string(),
            think_close: THINK_CLOSE.to_string(),
            step_label: STEP_LABEL.to_string(),
        }
    }
}

impl EvalConfig {
    /// Load from an explicit path (errors are fatal) or from
    /// `symeval.toml` in the working directory when present (errors fall
    /// back to defaults with a warning).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            return toml::from_str(&content)
                .with_context(|| format!("parsing config {}", path.display()));
        }

        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Error parsing config file: {}. Using defaults.", e),
                },
                Err(e) => tracing::warn!("Error reading config file: {}. Using defaults.", e),
            }
        }
        Ok(Self::default())
    }

    pub fn extractor(&self) -> Result<StepExtractor, ReasoningError> {
        StepExtractor::new(&self.think_open, &self.think_close)?.with_label_pattern(&self.step_label)
    }
}
