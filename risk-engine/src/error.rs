//! Error types for risk engine

use ledger_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Risk engine error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// No rate defined for the ordered pair
    #[error("Unsupported currency pair: {from} -> {to}")]
    UnsupportedCurrencyPair {
        /// Source currency
        from: CurrencyCode,
        /// Target currency
        to: CurrencyCode,
    },

    /// Amount exceeds the anomaly threshold
    #[error("Suspicious amount {amount}: exceeds threshold {threshold}")]
    SuspiciousAmount {
        /// Requested amount
        amount: Decimal,
        /// Average times multiplier
        threshold: Decimal,
    },

    /// Decimal overflow during conversion
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
