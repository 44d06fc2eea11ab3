use std::collections::BTreeSet;
use std::fmt;

use logic_ast::{Expr, VariableCollector};

use crate::error::EngineError;
use crate::term::{absorb, close_under_consensus, Term};

/// Term masks are 64 bits wide.
pub const MAX_VARIABLES: usize = 64;

/// Bit positions for the variables of one comparison, sorted by name so that
/// forms built from the same variables always line up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarIndex {
    names: Vec<String>,
}

impl VarIndex {
    pub fn new<I, S>(names: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.len() > MAX_VARIABLES {
            return Err(EngineError::TooManyVariables {
                found: names.len(),
                limit: MAX_VARIABLES,
            });
        }
        Ok(VarIndex {
            names: names.into_iter().collect(),
        })
    }

    /// Index over every variable mentioned by any of `exprs`.
    pub fn for_exprs(exprs: &[&Expr]) -> Result<Self, EngineError> {
        VarIndex::new(exprs.iter().flat_map(|e| VariableCollector::collect(e)))
    }

    pub fn bit(&self, name: &str) -> Result<u32, EngineError> {
        self.names
            .binary_search_by(|n| n.as_str().cmp(name))
            .map(|i| i as u32)
            .map_err(|_| EngineError::UnknownVariable(name.to_string()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Blake canonical form: the set of all prime implicants of a function.
///
/// Unique per truth function and variable index, so `==` is semantic
/// equivalence. `{⊤}` is a tautology and the empty set a contradiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalForm {
    terms: BTreeSet<Term>,
    index: VarIndex,
}

impl CanonicalForm {
    pub fn index(&self) -> &VarIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_tautology(&self) -> bool {
        self.terms.len() == 1 && self.terms.contains(&Term::TRUE)
    }

    pub fn is_contradiction(&self) -> bool {
        self.terms.is_empty()
    }

    /// Truth value under a bitmask of true variables (bit order of the index).
    pub fn holds(&self, assignment: u64) -> bool {
        self.terms.iter().any(|t| t.holds(assignment))
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "⊥");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", term.display(self.index.names()))?;
        }
        Ok(())
    }
}

fn union(mut lhs: Vec<Term>, rhs: Vec<Term>) -> Vec<Term> {
    lhs.extend(rhs);
    absorb(lhs)
}

fn product(lhs: &[Term], rhs: &[Term]) -> Vec<Term> {
    let mut out = Vec::with_capacity(lhs.len() * rhs.len());
    for a in lhs {
        for b in rhs {
            if let Some(t) = a.conjoin(b) {
                out.push(t);
            }
        }
    }
    absorb(out)
}

// DNF of `expr` (positive) or of `¬expr` (negative). Negation is pushed
// through the connectives as the recursion descends, so → and ↔ never need
// to be rewritten into a separate tree first.
fn dnf(expr: &Expr, positive: bool, index: &VarIndex) -> Result<Vec<Term>, EngineError> {
    let terms = match expr {
        Expr::Variable(name) => vec![Term::literal(index.bit(name)?, positive)],
        Expr::Not(e) => dnf(e, !positive, index)?,
        Expr::And(l, r) => {
            if positive {
                product(&dnf(l, true, index)?, &dnf(r, true, index)?)
            } else {
                union(dnf(l, false, index)?, dnf(r, false, index)?)
            }
        }
        Expr::Or(l, r) => {
            if positive {
                union(dnf(l, true, index)?, dnf(r, true, index)?)
            } else {
                product(&dnf(l, false, index)?, &dnf(r, false, index)?)
            }
        }
        // l → r  ≡  ¬l ∨ r
        Expr::Implies(l, r) => {
            if positive {
                union(dnf(l, false, index)?, dnf(r, true, index)?)
            } else {
                product(&dnf(l, true, index)?, &dnf(r, false, index)?)
            }
        }
        // ↔ needs both polarities of each side
        Expr::Equivalent(l, r) => {
            let lhs = dnf_both(l, index)?;
            let rhs = dnf_both(r, index)?;
            let (pos, neg) = equivalent_pair(lhs, rhs);
            if positive {
                pos
            } else {
                neg
            }
        }
    };
    Ok(terms)
}

type DnfPair = (Vec<Term>, Vec<Term>);

// l ↔ r  ≡  (l ∧ r) ∨ (¬l ∧ ¬r),  ¬(l ↔ r)  ≡  (l ∧ ¬r) ∨ (¬l ∧ r)
fn equivalent_pair((l_pos, l_neg): DnfPair, (r_pos, r_neg): DnfPair) -> DnfPair {
    (
        union(product(&l_pos, &r_pos), product(&l_neg, &r_neg)),
        union(product(&l_pos, &r_neg), product(&l_neg, &r_pos)),
    )
}

// DNFs of `expr` and `¬expr` in one pass, so nested ↔ visits every subtree
// once instead of once per polarity at each level.
fn dnf_both(expr: &Expr, index: &VarIndex) -> Result<DnfPair, EngineError> {
    let pair = match expr {
        Expr::Variable(name) => {
            let bit = index.bit(name)?;
            (vec![Term::literal(bit, true)], vec![Term::literal(bit, false)])
        }
        Expr::Not(e) => {
            let (pos, neg) = dnf_both(e, index)?;
            (neg, pos)
        }
        Expr::And(l, r) => {
            let (l_pos, l_neg) = dnf_both(l, index)?;
            let (r_pos, r_neg) = dnf_both(r, index)?;
            (product(&l_pos, &r_pos), union(l_neg, r_neg))
        }
        Expr::Or(l, r) => {
            let (l_pos, l_neg) = dnf_both(l, index)?;
            let (r_pos, r_neg) = dnf_both(r, index)?;
            (union(l_pos, r_pos), product(&l_neg, &r_neg))
        }
        Expr::Implies(l, r) => {
            let (l_pos, l_neg) = dnf_both(l, index)?;
            let (r_pos, r_neg) = dnf_both(r, index)?;
            (union(l_neg, r_pos), product(&l_pos, &r_neg))
        }
        Expr::Equivalent(l, r) => equivalent_pair(dnf_both(l, index)?, dnf_both(r, index)?),
    };
    Ok(pair)
}

/// Canonical form of `expr` over `index`.
///
/// Fails only when `expr` mentions a variable the index lacks.
pub fn canonicalize(expr: &Expr, index: &VarIndex) -> Result<CanonicalForm, EngineError> {
    let terms = close_under_consensus(dnf(expr, true, index)?);
    Ok(CanonicalForm {
        terms: terms.into_iter().collect(),
        index: index.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Expr {
        Expr::var("A")
    }

    fn b() -> Expr {
        Expr::var("B")
    }

    fn c() -> Expr {
        Expr::var("C")
    }

    fn abc() -> VarIndex {
        VarIndex::new(["C", "A", "B"]).unwrap()
    }

    #[test]
    fn test_index_is_sorted_and_deduplicated() {
        let index = VarIndex::new(["B", "A", "B"]).unwrap();
        assert_eq!(index.names(), &["A".to_string(), "B".to_string()]);
        assert_eq!(index.bit("B"), Ok(1));
        assert_eq!(
            index.bit("Z"),
            Err(EngineError::UnknownVariable("Z".to_string()))
        );
    }

    #[test]
    fn test_index_limit() {
        let names: Vec<String> = (0..65).map(|i| format!("x{}", i)).collect();
        assert_eq!(
            VarIndex::new(names),
            Err(EngineError::TooManyVariables {
                found: 65,
                limit: 64
            })
        );
    }

    #[test]
    fn test_index_for_exprs() {
        let index = VarIndex::for_exprs(&[&Expr::and(c(), a()), &b()]).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.bit("A"), Ok(0));
    }

    #[test]
    fn test_tautology_and_contradiction() {
        let index = abc();
        let excluded_middle = canonicalize(&Expr::or(a(), Expr::not(a())), &index).unwrap();
        assert!(excluded_middle.is_tautology());
        assert_eq!(excluded_middle.to_string(), "⊤");

        let clash = canonicalize(&Expr::and(a(), Expr::not(a())), &index).unwrap();
        assert!(clash.is_contradiction());
        assert_eq!(clash.to_string(), "⊥");
    }

    #[test]
    fn test_implication_form() {
        let form = canonicalize(&Expr::implies(a(), b()), &abc()).unwrap();
        assert_eq!(form.len(), 2);
        assert_eq!(form.to_string(), "¬A ∨ B");
    }

    #[test]
    fn test_biconditional_form() {
        let form = canonicalize(&Expr::equivalent(a(), b()), &abc()).unwrap();
        assert_eq!(form.len(), 2);
        assert!(form.holds(0b011));
        assert!(form.holds(0b000));
        assert!(!form.holds(0b001));
    }

    #[test]
    fn test_negated_biconditional_form() {
        let form = canonicalize(&Expr::not(Expr::equivalent(a(), b())), &abc()).unwrap();
        assert!(form.holds(0b001));
        assert!(form.holds(0b010));
        assert!(!form.holds(0b011));
    }

    #[test]
    fn test_unknown_variable_is_an_error() {
        let index = VarIndex::new(["A"]).unwrap();
        assert_eq!(
            canonicalize(&b(), &index),
            Err(EngineError::UnknownVariable("B".to_string()))
        );
    }

    #[test]
    fn test_nested_biconditionals_stay_linear() {
        // ((A ↔ B) ↔ C) ↔ A ... forty levels deep
        let names = [a(), b(), c()];
        let mut expr = a();
        for i in 0..40 {
            expr = Expr::equivalent(expr, names[(i + 1) % 3].clone());
        }
        let index = abc();
        let form = canonicalize(&expr, &index).unwrap();
        for mask in 0..8u64 {
            let value_of = |name: &str| {
                let bit = index.bit(name).unwrap_or(0);
                mask & (1 << bit) != 0
            };
            assert_eq!(form.holds(mask), expr.evaluate(&value_of), "mask {:03b}", mask);
        }

        let negated = canonicalize(&Expr::not(expr), &index).unwrap();
        for mask in 0..8u64 {
            assert_ne!(form.holds(mask), negated.holds(mask));
        }
    }
}
