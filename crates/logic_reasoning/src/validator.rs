use logic_ast::{Expr, VariableSet};
use logic_engine::are_equivalent;
use logic_parser::{parse, ParseError};
use serde::Serialize;

use crate::summary::RunSummary;
use crate::tally::Tally;
use crate::verdict::{Side, Verdict};

/// Verdict for steps `left` and `right` (1-based, `right == left + 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairOutcome {
    pub left: usize,
    pub right: usize,
    pub verdict: Verdict,
}

/// Verdict for one step checked against the ground truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruthOutcome {
    pub step: usize,
    pub verdict: Verdict,
}

/// Result of validating one response's steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of steps examined.
    pub steps: usize,
    pub pairwise: Tally,
    /// Present only when a ground truth was supplied.
    pub ground_truth: Option<Tally>,
    #[serde(skip)]
    pub pairs: Vec<PairOutcome>,
    #[serde(skip)]
    pub checks: Vec<GroundTruthOutcome>,
}

/// Scores derivations over one variable alphabet and accumulates a
/// [`RunSummary`] across responses.
#[derive(Debug, Clone)]
pub struct ReasoningValidator {
    variables: VariableSet,
    summary: RunSummary,
}

impl ReasoningValidator {
    pub fn new(variables: VariableSet) -> Self {
        ReasoningValidator {
            variables,
            summary: RunSummary::default(),
        }
    }

    /// Parse and compare two statements.
    pub fn compare(&self, lhs: &str, rhs: &str) -> Verdict {
        let left = parse(lhs, &self.variables);
        let right = parse(rhs, &self.variables);
        judge(&left, &right)
    }

    /// Check each consecutive pair of `steps`, and each step against
    /// `ground_truth` when given. Does not touch the accumulated summary.
    pub fn validate<S: AsRef<str>>(&self, steps: &[S], ground_truth: Option<&str>) -> ValidationReport {
        let parsed: Vec<Result<Expr, ParseError>> = steps
            .iter()
            .map(|s| parse(s.as_ref(), &self.variables))
            .collect();

        let mut report = ValidationReport {
            steps: parsed.len(),
            ..ValidationReport::default()
        };

        for (i, pair) in parsed.windows(2).enumerate() {
            let verdict = judge(&pair[0], &pair[1]);
            tracing::debug!(left = i + 1, right = i + 2, %verdict, "step pair");
            report.pairwise.record(&verdict);
            report.pairs.push(PairOutcome {
                left: i + 1,
                right: i + 2,
                verdict,
            });
        }

        if let Some(truth) = ground_truth {
            let truth = parse(truth, &self.variables);
            if let Err(e) = &truth {
                tracing::warn!(error = %e, "ground truth does not parse; every step scores false");
            }
            let mut tally = Tally::default();
            for (i, step) in parsed.iter().enumerate() {
                let verdict = judge(step, &truth);
                tracing::debug!(step = i + 1, %verdict, "ground truth check");
                tally.record(&verdict);
                report.checks.push(GroundTruthOutcome {
                    step: i + 1,
                    verdict,
                });
            }
            report.ground_truth = Some(tally);
        }

        report
    }

    /// Add a report to the running summary.
    pub fn record(&mut self, report: &ValidationReport) {
        self.summary.record(report);
    }

    pub fn validate_and_record<S: AsRef<str>>(
        &mut self,
        steps: &[S],
        ground_truth: Option<&str>,
    ) -> ValidationReport {
        let report = self.validate(steps, ground_truth);
        self.record(&report);
        report
    }

    /// Count a response that had no ground truth to check against.
    pub fn note_missing_ground_truth(&mut self) {
        self.summary.note_missing_ground_truth();
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn into_summary(self) -> RunSummary {
        self.summary
    }
}

// Left-side parse failures take precedence when both sides fail.
fn judge(lhs: &Result<Expr, ParseError>, rhs: &Result<Expr, ParseError>) -> Verdict {
    let (l, r) = match (lhs, rhs) {
        (Err(e), _) => {
            return Verdict::ParseFailure {
                side: Side::Left,
                error: e.clone(),
            }
        }
        (_, Err(e)) => {
            return Verdict::ParseFailure {
                side: Side::Right,
                error: e.clone(),
            }
        }
        (Ok(l), Ok(r)) => (l, r),
    };

    match are_equivalent(l, r) {
        Ok(true) => Verdict::Equivalent,
        Ok(false) => Verdict::NotEquivalent,
        Err(e) => {
            tracing::warn!(error = %e, lhs = %l, rhs = %r, "equivalence check failed; scoring as false");
            Verdict::NotEquivalent
        }
    }
}

/// Validate one step sequence over `variables`.
pub fn validate<S: AsRef<str>>(
    steps: &[S],
    variables: &VariableSet,
    ground_truth: Option<&str>,
) -> ValidationReport {
    ReasoningValidator::new(variables.clone()).validate(steps, ground_truth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> VariableSet {
        VariableSet::default()
    }

    #[test]
    fn test_contradicting_pair() {
        let report = validate(&["A", "~A"], &abc(), None);
        assert_eq!(report.pairwise.total, 1);
        assert_eq!(report.pairwise.false_count, 1);
        assert_eq!(report.pairs[0].verdict, Verdict::NotEquivalent);
        assert!(report.ground_truth.is_none());
    }

    #[test]
    fn test_commuted_pair() {
        let report = validate(&["A & B", "B & A"], &abc(), None);
        assert_eq!(report.pairwise.total, 1);
        assert_eq!(report.pairwise.false_count, 0);
    }

    #[test]
    fn test_fewer_than_two_steps() {
        let none: [&str; 0] = [];
        let empty = validate(&none, &abc(), None);
        assert_eq!(empty.pairwise.total, 0);
        assert_eq!(empty.pairwise.accuracy(), None);

        let single = validate(&["only one step"], &abc(), None);
        assert_eq!(single.pairwise.total, 0);
        assert_eq!(single.pairwise.false_rate(), None);
    }

    #[test]
    fn test_parse_failure_counts_as_false() {
        let report = validate(&["A ∧ B", "A ∧ D", "B ∧ A"], &abc(), None);
        assert_eq!(report.pairwise.total, 2);
        assert_eq!(report.pairwise.false_count, 2);
        assert_eq!(report.pairwise.parse_failures, 2);
        assert_eq!(
            report.pairs[0].verdict,
            Verdict::ParseFailure {
                side: Side::Right,
                error: ParseError::UnboundVariable("D".to_string())
            }
        );
        assert!(matches!(
            report.pairs[1].verdict,
            Verdict::ParseFailure {
                side: Side::Left,
                ..
            }
        ));
    }

    #[test]
    fn test_ground_truth_checks_every_step() {
        let steps = ["A ↔ ¬B", "¬B ↔ A", "A ∧ ¬B"];
        let report = validate(&steps, &abc(), Some("A ↔ ¬B"));
        let truth = report.ground_truth.unwrap();
        assert_eq!(truth.total, 3);
        assert_eq!(truth.false_count, 1);
        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.checks[2].step, 3);
        assert_eq!(report.checks[2].verdict, Verdict::NotEquivalent);
    }

    #[test]
    fn test_unparseable_ground_truth_fails_every_check() {
        let report = validate(&["A", "A"], &abc(), Some("A ∧"));
        let truth = report.ground_truth.unwrap();
        assert_eq!(truth.total, 2);
        assert_eq!(truth.false_count, 2);
        assert_eq!(truth.parse_failures, 2);
        assert_eq!(report.pairwise.false_count, 0);
    }

    #[test]
    fn test_ground_truth_with_no_steps() {
        let none: [&str; 0] = [];
        let report = validate(&none, &abc(), Some("A"));
        assert_eq!(report.ground_truth, Some(Tally::default()));
    }

    #[test]
    fn test_compare() {
        let validator = ReasoningValidator::new(abc());
        assert_eq!(validator.compare("A → B", "¬A ∨ B"), Verdict::Equivalent);
        assert!(validator.compare("", "A").is_parse_failure());
    }

    #[test]
    fn test_record_accumulates() {
        let mut validator = ReasoningValidator::new(abc());
        validator.validate_and_record(&["A", "A", "~A"], Some("A"));
        validator.validate_and_record(&["B"], None);

        let summary = validator.summary();
        assert_eq!(summary.responses, 2);
        assert_eq!(summary.pairwise.total, 2);
        assert_eq!(summary.pairwise.false_count, 1);
        assert_eq!(summary.ground_truth.total, 3);
        assert_eq!(summary.ground_truth.false_count, 1);
    }

    #[test]
    fn test_deeply_nested_step_scores_as_parse_failure() {
        let negations = format!("{}A", "¬".repeat(100_000));
        let parens = format!("{}A{}", "(".repeat(100_000), ")".repeat(100_000));
        let report = validate(&[negations.as_str(), "A", parens.as_str()], &abc(), Some("A"));

        assert_eq!(report.pairwise.total, 2);
        assert_eq!(report.pairwise.false_count, 2);
        assert_eq!(report.pairwise.parse_failures, 2);
        assert_eq!(
            report.pairs[0].verdict,
            Verdict::ParseFailure {
                side: Side::Left,
                error: ParseError::TooDeep(logic_parser::MAX_DEPTH)
            }
        );

        let truth = report.ground_truth.unwrap();
        assert_eq!(truth.total, 3);
        assert_eq!(truth.false_count, 2);
    }
}
