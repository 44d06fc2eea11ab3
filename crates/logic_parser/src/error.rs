use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty expression")]
    Empty,
    #[error("Expression nests deeper than {0} levels")]
    TooDeep(usize),
    #[error("Unbalanced parenthesis at byte {0}")]
    UnbalancedParentheses(usize),
    #[error("Parse error: {0}")]
    NomError(String),
    #[error("Unconsumed input: {0}")]
    UnconsumedInput(String),
    #[error("Unbound variable '{0}'")]
    UnboundVariable(String),
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error("{name} expects {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },
}
