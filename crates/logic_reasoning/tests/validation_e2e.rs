//! End-to-end: raw model output through extraction and validation.

use logic_ast::VariableSet;
use logic_reasoning::{extract_steps, validate, ReasoningValidator, Verdict};

const SOUND_RESPONSE: &str = "We can represent the problem as symbolic logic.\n\
<think>step 1: (A ↔ ¬B) ∧ (B ↔ (A ↔ C))\n\
step 2: (A ↔ ¬B) ∧ (¬A ↔ (A ↔ C))\n\
step 3: (A ↔ ¬B) ∧ ¬C</think>\n\
<answer>C: liar</answer>";

const FLAWED_RESPONSE: &str = "<think>step 1: (A ↔ ¬B) ∧ (B ↔ (A ↔ C))\n\
step 2: A is a truth-teller, so B lies\n\
step 3: A ∧ ¬B ∧ C</think>";

#[test]
fn sound_derivation_scores_perfectly() {
    let steps = extract_steps(SOUND_RESPONSE);
    assert_eq!(steps.len(), 3);

    let report = validate(&steps, &VariableSet::default(), Some("(A ↔ ¬B) ∧ (B ↔ (A ↔ C))"));
    assert_eq!(report.pairwise.total, 2);
    assert_eq!(report.pairwise.false_count, 0);
    assert_eq!(report.pairwise.accuracy(), Some(1.0));

    let truth = report.ground_truth.unwrap();
    assert_eq!(truth.total, 3);
    assert_eq!(truth.false_count, 0);
}

#[test]
fn prose_step_and_wrong_conclusion_are_both_false() {
    let steps = extract_steps(FLAWED_RESPONSE);
    let report = validate(&steps, &VariableSet::default(), Some("(A ↔ ¬B) ∧ (B ↔ (A ↔ C))"));

    assert_eq!(report.pairwise.total, 2);
    assert_eq!(report.pairwise.false_count, 2);
    assert_eq!(report.pairwise.parse_failures, 2);

    let truth = report.ground_truth.unwrap();
    assert_eq!(truth.total, 3);
    assert_eq!(truth.false_count, 2);
    assert_eq!(truth.parse_failures, 1);
    assert_eq!(report.checks[2].verdict, Verdict::NotEquivalent);
}

#[test]
fn response_without_reasoning_region_scores_zero_pairs() {
    let mut validator = ReasoningValidator::new(VariableSet::default());
    let steps = extract_steps("A: liar\nB: truth-teller");
    let report = validator.validate_and_record(&steps, Some("A ↔ ¬B"));

    assert_eq!(report.steps, 0);
    assert_eq!(report.pairwise.total, 0);
    assert_eq!(report.ground_truth.unwrap().total, 0);

    let summary = validator.into_summary();
    assert_eq!(summary.responses_without_steps, 1);
    assert!(summary.to_string().contains("Accuracy: n/a"));
}

#[test]
fn summary_across_responses() {
    let mut validator = ReasoningValidator::new(VariableSet::default());
    for response in [SOUND_RESPONSE, FLAWED_RESPONSE] {
        let steps = extract_steps(response);
        validator.validate_and_record(&steps, Some("(A ↔ ¬B) ∧ (B ↔ (A ↔ C))"));
    }

    let summary = validator.summary();
    assert_eq!(summary.responses, 2);
    assert_eq!(summary.pairwise.total, 4);
    assert_eq!(summary.pairwise.false_count, 2);
    assert_eq!(summary.ground_truth.total, 6);
    assert_eq!(summary.ground_truth.false_count, 2);

    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["pairwise"]["total"], 4);
    assert_eq!(json["pairwise"]["false"], 2);
    assert_eq!(json["pairwise"]["accuracy"], 0.5);
}

#[test]
fn empty_summary_serializes_null_rates() {
    let validator = ReasoningValidator::new(VariableSet::default());
    let json = serde_json::to_value(validator.summary()).unwrap();
    assert!(json["ground_truth"]["accuracy"].is_null());
}
