//! Error types for the ledger

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// Backing store failure (I/O, RocksDB, lock poisoning)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Record bytes are not a valid transfer record
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored digest does not match the record contents
    #[error("Integrity check failed: {0}")]
    Integrity(String),

    /// Currency code outside the supported set
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the stored bytes themselves are bad, as opposed to the store
    /// being unreachable.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Serialization(_) | Error::Integrity(_))
    }
}

#[cfg(feature = "rocksdb")]
impl From<rocksdb::Error> for Error {
    fn from(err: rocksdb::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
