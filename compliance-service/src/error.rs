//! Error types for compliance screening

use thiserror::Error;

/// Compliance errors
#[derive(Error, Debug)]
pub enum ComplianceError {
    /// Malformed sanctions entry
    #[error("Invalid sanctions entry: {0}")]
    InvalidInput(String),

    /// Sanctions list could not be read
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, ComplianceError>;
