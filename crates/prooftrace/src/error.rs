//! Error types for the prover

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProverError {
    /// A formula reached a stage that has no rule for its shape
    #[error("Cannot classify formula `{formula}` during {stage}")]
    Classification { formula: String, stage: &'static str },

    /// Quantifier stripping met an existential after Skolemization
    #[error("Non-universal quantifier left in `{0}` after Skolemization")]
    UnexpectedQuantifier(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Include file not found: {0}")]
    IncludeNotFound(String),

    #[error("Circular include detected: {0}")]
    CircularInclude(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProverError>;
