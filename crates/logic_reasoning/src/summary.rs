use std::fmt;

use serde::Serialize;

use crate::tally::Tally;
use crate::validator::ValidationReport;

/// Aggregate over every response of one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub responses: usize,
    pub responses_without_steps: usize,
    pub missing_ground_truth: usize,
    pub pairwise: Tally,
    pub ground_truth: Tally,
}

impl RunSummary {
    pub fn record(&mut self, report: &ValidationReport) {
        self.responses += 1;
        if report.steps == 0 {
            self.responses_without_steps += 1;
        }
        self.pairwise += report.pairwise;
        if let Some(truth) = report.ground_truth {
            self.ground_truth += truth;
        }
    }

    /// A response was scored without a ground truth to check against.
    pub fn note_missing_ground_truth(&mut self) {
        self.missing_ground_truth += 1;
    }
}

fn percent(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total sequence pair reasoning: {}, False: {}",
            self.pairwise.total, self.pairwise.false_count
        )?;
        writeln!(
            f,
            "Accuracy: {}, False Rate: {}",
            percent(self.pairwise.accuracy()),
            percent(self.pairwise.false_rate())
        )?;
        writeln!(
            f,
            "Total reasoning: {}, False: {}",
            self.ground_truth.total, self.ground_truth.false_count
        )?;
        write!(
            f,
            "Accuracy: {}, False Rate: {}",
            percent(self.ground_truth.accuracy()),
            percent(self.ground_truth.false_rate())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_report_format() {
        let summary = RunSummary {
            responses: 2,
            responses_without_steps: 0,
            missing_ground_truth: 0,
            pairwise: Tally {
                total: 3,
                false_count: 1,
                parse_failures: 0,
            },
            ground_truth: Tally {
                total: 4,
                false_count: 4,
                parse_failures: 2,
            },
        };
        assert_eq!(
            summary.to_string(),
            "Total sequence pair reasoning: 3, False: 1\n\
             Accuracy: 66.67%, False Rate: 33.33%\n\
             Total reasoning: 4, False: 4\n\
             Accuracy: 0.00%, False Rate: 100.00%"
        );
    }

    #[test]
    fn test_display_empty_run() {
        assert_eq!(
            RunSummary::default().to_string(),
            "Total sequence pair reasoning: 0, False: 0\n\
             Accuracy: n/a, False Rate: n/a\n\
             Total reasoning: 0, False: 0\n\
             Accuracy: n/a, False Rate: n/a"
        );
    }
}
