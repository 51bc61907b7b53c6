//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when an add or edit request misses a field.
//! - [`UnknownSchema`] thrown when the store header is not recognized.
//! - [`IdOverflow`] thrown when the store already holds the largest id.
//! - [`Io`] and [`Csv`] thrown when the store cannot be read or written.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`UnknownSchema`]: EngineError::UnknownSchema
//!  [`IdOverflow`]: EngineError::IdOverflow
//!  [`Io`]: EngineError::Io
//!  [`Csv`]: EngineError::Csv
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("Unknown store header: {0}")]
    UnknownSchema(String),
    #[error("No id left after {0}")]
    IdOverflow(u64),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::UnknownSchema(a), Self::UnknownSchema(b)) => a == b,
            (Self::IdOverflow(a), Self::IdOverflow(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
