//! Error types for the transfer pipeline

use compliance_service::ComplianceError;
use ledger_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for transfer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Transfer errors
///
/// Every rejection aborts the pipeline before anything is written. Only
/// `LedgerUnavailable` is worth retrying, and retries belong to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transaction id already committed
    #[error("Duplicate transaction id: {0}")]
    DuplicateTransactionId(String),

    /// Unknown client id
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Amount exceeds the client's balance
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Requested amount
        requested: Decimal,
        /// Client balance
        available: Decimal,
    },

    /// Destination is on the sanctions list
    #[error("Sanctioned destination: {0}")]
    SanctionedDestination(String),

    /// Amount exceeds the anomaly threshold
    #[error("Suspicious amount {amount}: exceeds threshold {threshold}")]
    SuspiciousAmount {
        /// Requested amount
        amount: Decimal,
        /// Client average times the policy multiplier
        threshold: Decimal,
    },

    /// No conversion rate for the pair
    #[error("Unsupported currency pair: {from} -> {to}")]
    UnsupportedCurrencyPair {
        /// Client home currency
        from: CurrencyCode,
        /// Requested destination currency
        to: CurrencyCode,
    },

    /// Amount arithmetic left the representable range
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Ledger store failed
    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// Nothing stored under the id
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Stored bytes are not a valid record
    #[error("Corrupt record {transaction_id}: {reason}")]
    CorruptRecord {
        /// Ledger key
        transaction_id: String,
        /// What failed
        reason: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a ledger failure
    pub fn ledger(err: ledger_core::Error) -> Self {
        Error::LedgerUnavailable(err.to_string())
    }

    /// Stable label for logs and metrics
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidRequest(_) => "invalid_request",
            Error::DuplicateTransactionId(_) => "duplicate_transaction_id",
            Error::ClientNotFound(_) => "client_not_found",
            Error::InsufficientFunds { .. } => "insufficient_funds",
            Error::SanctionedDestination(_) => "sanctioned_destination",
            Error::SuspiciousAmount { .. } => "suspicious_amount",
            Error::UnsupportedCurrencyPair { .. } => "unsupported_currency_pair",
            Error::Calculation(_) => "calculation",
            Error::LedgerUnavailable(_) => "ledger_unavailable",
            Error::TransactionNotFound(_) => "transaction_not_found",
            Error::CorruptRecord { .. } => "corrupt_record",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
        }
    }

    /// Whether the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::LedgerUnavailable(_))
    }
}

impl From<risk_engine::Error> for Error {
    fn from(err: risk_engine::Error) -> Self {
        match err {
            risk_engine::Error::UnsupportedCurrencyPair { from, to } => {
                Error::UnsupportedCurrencyPair { from, to }
            }
            risk_engine::Error::SuspiciousAmount { amount, threshold } => {
                Error::SuspiciousAmount { amount, threshold }
            }
            risk_engine::Error::Calculation(msg) => Error::Calculation(msg),
            risk_engine::Error::InvalidConfig(msg) => Error::Config(msg),
        }
    }
}

impl From<ComplianceError> for Error {
    fn from(err: ComplianceError) -> Self {
        Error::Config(err.to_string())
    }
}
