use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReasoningError {
    #[error("{0} marker must not be empty")]
    EmptyMarker(&'static str),
    #[error("invalid step label pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
