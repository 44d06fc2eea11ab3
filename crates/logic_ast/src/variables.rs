//! The bound variable alphabet for parsing.
//!
//! Every `Expr::Variable` produced by the parser names a member of the active
//! `VariableSet`. Names keep their insertion order.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AstError;

/// Names that the tokenizer reads as operators.
const RESERVED: &[&str] = &["v"];

/// Ordered, de-duplicated set of variable names.
///
/// # Design
/// - `names`: insertion order, used for display and serialization
/// - `members`: O(1) membership checks for the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct VariableSet {
    names: Vec<String>,
    members: HashSet<String>,
}

impl VariableSet {
    /// Build a set from names; duplicates keep their first position.
    pub fn new<I, S>(names: I) -> Result<Self, AstError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = VariableSet {
            names: Vec::new(),
            members: HashSet::new(),
        };
        for name in names {
            set.insert(name.as_ref())?;
        }
        if set.is_empty() {
            return Err(AstError::EmptyVariableSet);
        }
        Ok(set)
    }

    /// Add a name. Returns false if it was already present.
    pub fn insert(&mut self, name: &str) -> Result<bool, AstError> {
        if self.members.contains(name) {
            return Ok(false);
        }
        if !is_identifier(name) {
            return Err(AstError::InvalidVariableName(name.to_string()));
        }
        if RESERVED.contains(&name) {
            return Err(AstError::ReservedName(name.to_string()));
        }

        self.names.push(name.to_string());
        self.members.insert(name.to_string());
        Ok(true)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Default for VariableSet {
    /// The three-character puzzle alphabet `{A, B, C}`.
    fn default() -> Self {
        let names: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let members = names.iter().cloned().collect();
        VariableSet { names, members }
    }
}

impl FromStr for VariableSet {
    type Err = AstError;

    /// Parse a comma-separated list such as `"A, B, C"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariableSet::new(s.split(',').map(str::trim).filter(|n| !n.is_empty()))
    }
}

impl TryFrom<Vec<String>> for VariableSet {
    type Error = AstError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        VariableSet::new(names)
    }
}

impl From<VariableSet> for Vec<String> {
    fn from(set: VariableSet) -> Self {
        set.names
    }
}

impl fmt::Display for VariableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.names.join(", "))
    }
}
