use std::fmt;

use logic_parser::ParseError;
use serde::Serialize;

/// Which operand of a comparison failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Outcome of comparing two steps (or a step and the ground truth).
///
/// Parse failures score like `NotEquivalent` but stay distinguishable for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Equivalent,
    NotEquivalent,
    ParseFailure { side: Side, error: ParseError },
}

impl Verdict {
    pub fn counts_as_false(&self) -> bool {
        !matches!(self, Verdict::Equivalent)
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Verdict::ParseFailure { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Equivalent => write!(f, "equivalent"),
            Verdict::NotEquivalent => write!(f, "not equivalent"),
            Verdict::ParseFailure { side, error } => {
                let side = match side {
                    Side::Left => "left",
                    Side::Right => "right",
                };
                write!(f, "parse failure ({} side): {}", side, error)
            }
        }
    }
}
