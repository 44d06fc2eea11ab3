//! Locating and splitting the reasoning region of a model response.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ReasoningError;

pub const THINK_OPEN: &str = "<think>";
pub const THINK_CLOSE: &str = "</think>";
pub const STEP_LABEL: &str = r"step\s*\d+:\s*";

fn default_label() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| Regex::new(STEP_LABEL).expect("STEP_LABEL is a valid pattern"))
}

/// One labeled step, numbered by position in the response (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasoningStep {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct StepExtractor {
    open: String,
    close: String,
    label: Regex,
}

impl Default for StepExtractor {
    fn default() -> Self {
        StepExtractor {
            open: THINK_OPEN.to_string(),
            close: THINK_CLOSE.to_string(),
            label: default_label().clone(),
        }
    }
}

impl StepExtractor {
    pub fn new(open: &str, close: &str) -> Result<Self, ReasoningError> {
        if open.is_empty() {
            return Err(ReasoningError::EmptyMarker("open"));
        }
        if close.is_empty() {
            return Err(ReasoningError::EmptyMarker("close"));
        }
        Ok(StepExtractor {
            open: open.to_string(),
            close: close.to_string(),
            label: default_label().clone(),
        })
    }

    /// Replace the step label pattern, e.g. `(?i)step\s*\d+:\s*`.
    pub fn with_label_pattern(mut self, pattern: &str) -> Result<Self, ReasoningError> {
        self.label = Regex::new(pattern)?;
        Ok(self)
    }

    /// Text between the first open marker and the first close marker after it.
    pub fn region<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = text.find(&self.open)? + self.open.len();
        let len = text[start..].find(&self.close)?;
        Some(&text[start..start + len])
    }

    /// Steps in textual order. Label numbers are not checked; text before the
    /// first label is ignored. Missing region means zero steps.
    pub fn extract(&self, text: &str) -> Vec<ReasoningStep> {
        let Some(region) = self.region(text) else {
            return Vec::new();
        };

        let labels: Vec<_> = self.label.find_iter(region).collect();
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let end = labels.get(i + 1).map_or(region.len(), |next| next.start());
                ReasoningStep {
                    index: i + 1,
                    text: region[label.end()..end].trim().to_string(),
                }
            })
            .collect()
    }

    pub fn extract_texts(&self, text: &str) -> Vec<String> {
        self.extract(text).into_iter().map(|s| s.text).collect()
    }
}

/// Step texts of `text` using the default `<think>` markers.
pub fn extract_steps(text: &str) -> Vec<String> {
    StepExtractor::default().extract_texts(text)
}
