use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{found} variables exceed the limit of {limit} per comparison")]
    TooManyVariables { found: usize, limit: usize },
    #[error("variable '{0}' is missing from the index")]
    UnknownVariable(String),
}
