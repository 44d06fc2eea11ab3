//! Boolean canonicalization and equivalence checking.
//!
//! Expressions are reduced to their Blake canonical form (the disjunction of
//! all prime implicants). Two expressions denote the same truth function iff
//! their forms over a shared variable index are equal.

pub mod canonical;
pub mod equivalence;
pub mod error;
pub mod term;

pub use canonical::{canonicalize, CanonicalForm, VarIndex};
pub use equivalence::{are_equivalent, compare, counterexample, equivalent, Assignment, Comparison};
pub use error::EngineError;
pub use term::Term;
