//! Conjunctive terms over at most 64 variables.

use std::fmt;

/// A conjunction of literals: bit `i` of `pos` is the literal `xᵢ`, bit `i`
/// of `neg` is `¬xᵢ`. A term never holds both polarities of one variable.
/// The empty term is `⊤`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Term {
    pos: u64,
    neg: u64,
}

impl Term {
    pub const TRUE: Term = Term { pos: 0, neg: 0 };

    pub fn literal(bit: u32, positive: bool) -> Self {
        let mask = 1u64 << bit;
        if positive {
            Term { pos: mask, neg: 0 }
        } else {
            Term { pos: 0, neg: mask }
        }
    }

    pub fn literal_count(&self) -> u32 {
        self.pos.count_ones() + self.neg.count_ones()
    }

    /// `self ∧ other`, or None when the result is contradictory.
    pub fn conjoin(&self, other: &Term) -> Option<Term> {
        let pos = self.pos | other.pos;
        let neg = self.neg | other.neg;
        if pos & neg != 0 {
            None
        } else {
            Some(Term { pos, neg })
        }
    }

    /// True when every literal of `self` appears in `other` (so `other`
    /// implies `self`).
    pub fn subsumes(&self, other: &Term) -> bool {
        self.pos & !other.pos == 0 && self.neg & !other.neg == 0
    }

    /// Consensus of two terms that clash on exactly one variable:
    /// `x ∧ P` and `¬x ∧ Q` give `P ∧ Q`.
    pub fn consensus(&self, other: &Term) -> Option<Term> {
        let clash = (self.pos & other.neg) | (self.neg & other.pos);
        if clash.count_ones() != 1 {
            return None;
        }
        Some(Term {
            pos: (self.pos | other.pos) & !clash,
            neg: (self.neg | other.neg) & !clash,
        })
    }

    /// Truth value under an assignment given as a bitmask of true variables.
    pub fn holds(&self, assignment: u64) -> bool {
        self.pos & !assignment == 0 && self.neg & assignment == 0
    }

    pub(crate) fn display<'a>(&'a self, names: &'a [String]) -> DisplayTerm<'a> {
        DisplayTerm { term: self, names }
    }
}

/// Drop duplicates and every term implied by a shorter one.
pub fn absorb(mut terms: Vec<Term>) -> Vec<Term> {
    terms.sort_by_key(|t| (t.literal_count(), *t));
    let mut kept: Vec<Term> = Vec::with_capacity(terms.len());
    for term in terms {
        if !kept.iter().any(|k| k.subsumes(&term)) {
            kept.push(term);
        }
    }
    kept
}

/// Add consensus terms until no new implicant appears, then absorb.
/// The result is the set of all prime implicants.
pub fn close_under_consensus(terms: Vec<Term>) -> Vec<Term> {
    let mut terms = absorb(terms);
    loop {
        let mut fresh: Vec<Term> = Vec::new();
        for (i, a) in terms.iter().enumerate() {
            for b in &terms[i + 1..] {
                if let Some(c) = a.consensus(b) {
                    if !terms.iter().chain(fresh.iter()).any(|t| t.subsumes(&c)) {
                        fresh.push(c);
                    }
                }
            }
        }
        if fresh.is_empty() {
            return terms;
        }
        terms.extend(fresh);
        terms = absorb(terms);
    }
}

pub(crate) struct DisplayTerm<'a> {
    term: &'a Term,
    names: &'a [String],
}

impl fmt::Display for DisplayTerm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self.term == Term::TRUE {
            return write!(f, "⊤");
        }
        let mut first = true;
        for (bit, name) in self.names.iter().enumerate() {
            let mask = 1u64 << bit;
            let sign = if self.term.pos & mask != 0 {
                ""
            } else if self.term.neg & mask != 0 {
                "¬"
            } else {
                continue;
            };
            if !first {
                write!(f, " ∧ ")?;
            }
            write!(f, "{}{}", sign, name)?;
            first = false;
        }
        Ok(())
    }
}
