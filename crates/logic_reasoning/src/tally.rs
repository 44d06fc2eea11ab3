use std::ops::AddAssign;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::verdict::Verdict;

/// Running count of comparisons and how many scored false.
///
/// `parse_failures` is the subset of `false_count` caused by unparseable
/// text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub false_count: usize,
    pub parse_failures: usize,
}

impl Tally {
    pub fn record(&mut self, verdict: &Verdict) {
        self.total += 1;
        if verdict.counts_as_false() {
            self.false_count += 1;
        }
        if verdict.is_parse_failure() {
            self.parse_failures += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Share of comparisons that held; None for an empty tally.
    pub fn accuracy(&self) -> Option<f64> {
        self.ratio(self.total - self.false_count)
    }

    pub fn false_rate(&self) -> Option<f64> {
        self.ratio(self.false_count)
    }

    fn ratio(&self, count: usize) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(count as f64 / self.total as f64)
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        self.total += other.total;
        self.false_count += other.false_count;
        self.parse_failures += other.parse_failures;
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Tally", 5)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("false", &self.false_count)?;
        state.serialize_field("parse_failures", &self.parse_failures)?;
        state.serialize_field("accuracy", &self.accuracy())?;
        state.serialize_field("false_rate", &self.false_rate())?;
        state.end()
    }
}
