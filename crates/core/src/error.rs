use thiserror::Error;

/// Errors raised by the specialist-finding core
#[derive(Debug, Error, PartialEq)]
pub enum TriageError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider dataset error: {0}")]
    Dataset(String),
}
