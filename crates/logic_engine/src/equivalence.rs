use std::fmt;

use logic_ast::Expr;

use crate::canonical::{canonicalize, CanonicalForm, VarIndex};
use crate::error::EngineError;

/// Counterexample search enumerates assignments, so it is capped.
pub const MAX_COUNTEREXAMPLE_VARIABLES: usize = 16;

/// Truth values for the variables of one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub values: Vec<(String, bool)>,
}

impl Assignment {
    pub fn value(&self, name: &str) -> Option<bool> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, if *value { "T" } else { "F" })?;
        }
        Ok(())
    }
}

/// Full result of comparing two expressions, for diagnostics.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub lhs: CanonicalForm,
    pub rhs: CanonicalForm,
    pub equivalent: bool,
    /// First assignment that tells the two apart, when small enough to search.
    pub counterexample: Option<Assignment>,
}

/// Whether `lhs` and `rhs` denote the same truth function.
pub fn are_equivalent(lhs: &Expr, rhs: &Expr) -> Result<bool, EngineError> {
    let index = VarIndex::for_exprs(&[lhs, rhs])?;
    let left = canonicalize(lhs, &index)?;
    let right = canonicalize(rhs, &index)?;
    let equivalent = left == right;
    tracing::debug!(lhs = %left, rhs = %right, equivalent, "compared canonical forms");
    Ok(equivalent)
}

/// Total form of [`are_equivalent`]: an internal failure reads as "not
/// equivalent".
pub fn equivalent(lhs: &Expr, rhs: &Expr) -> bool {
    match are_equivalent(lhs, rhs) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "equivalence check failed");
            false
        }
    }
}

/// First assignment, in binary counting order over the sorted variable
/// names, on which `lhs` and `rhs` disagree.
///
/// Returns `Ok(None)` when they agree everywhere or when more than
/// [`MAX_COUNTEREXAMPLE_VARIABLES`] variables are involved.
pub fn counterexample(lhs: &Expr, rhs: &Expr) -> Result<Option<Assignment>, EngineError> {
    let index = VarIndex::for_exprs(&[lhs, rhs])?;
    let left = canonicalize(lhs, &index)?;
    let right = canonicalize(rhs, &index)?;
    Ok(find_counterexample(&left, &right))
}

fn find_counterexample(left: &CanonicalForm, right: &CanonicalForm) -> Option<Assignment> {
    let names = left.index().names();
    if left == right || names.len() > MAX_COUNTEREXAMPLE_VARIABLES {
        return None;
    }
    (0u64..1 << names.len())
        .find(|&mask| left.holds(mask) != right.holds(mask))
        .map(|mask| Assignment {
            values: names
                .iter()
                .enumerate()
                .map(|(bit, name)| (name.clone(), mask & (1 << bit) != 0))
                .collect(),
        })
}

/// Canonicalize both sides and report forms, verdict and a counterexample.
pub fn compare(lhs: &Expr, rhs: &Expr) -> Result<Comparison, EngineError> {
    let index = VarIndex::for_exprs(&[lhs, rhs])?;
    let left = canonicalize(lhs, &index)?;
    let right = canonicalize(rhs, &index)?;
    let counterexample = find_counterexample(&left, &right);
    Ok(Comparison {
        equivalent: left == right,
        lhs: left,
        rhs: right,
        counterexample,
    })
}
