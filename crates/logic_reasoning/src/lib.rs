//! Scoring of step-by-step symbolic derivations.
//!
//! A response's reasoning region is split into steps, each consecutive pair
//! is checked for logical equivalence, and every step may additionally be
//! checked against a ground-truth premise. Unparseable steps count as false.

pub mod error;
pub mod steps;
pub mod summary;
pub mod tally;
pub mod validator;
pub mod verdict;

pub use error::ReasoningError;
pub use steps::{extract_steps, ReasoningStep, StepExtractor};
pub use summary::RunSummary;
pub use tally::Tally;
pub use validator::{validate, GroundTruthOutcome, PairOutcome, ReasoningValidator, ValidationReport};
pub use verdict::{Side, Verdict};
