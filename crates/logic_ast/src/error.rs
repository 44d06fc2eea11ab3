//! Error types for logic_ast crate.

use thiserror::Error;

/// Errors raised while building a variable set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// Name is not an identifier (`[A-Za-z_][A-Za-z0-9_]*`)
    #[error("invalid variable name '{0}'")]
    InvalidVariableName(String),

    /// Name collides with an operator glyph
    #[error("'{0}' is reserved as an operator and cannot name a variable")]
    ReservedName(String),

    #[error("variable set is empty")]
    EmptyVariableSet,
}
