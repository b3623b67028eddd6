//! Error types for the refuel ledger

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// Plate was empty or whitespace only
    #[error("Plate must not be empty")]
    EmptyPlate,

    /// Refuel amount below zero
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(Decimal),

    /// Required form field left blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Monetary text that the strict parser refused
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// No record for the given plate
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Concurrency error (actor mailbox closed, etc.)
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metrics registry error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Input-contract violations are rejected before the ledger is touched
    pub fn is_input_violation(&self) -> bool {
        matches!(
            self,
            Error::EmptyPlate
                | Error::NegativeAmount(_)
                | Error::MissingField(_)
                | Error::InvalidAmount(_)
        )
    }
}
