//! DelTran Ledger Core
//!
//! Key-value ledger collaborator for committed transfers.
//!
//! # Architecture
//!
//! - **Store trait**: `get` / `put` / `put_if_absent` keyed by transaction id
//! - **Backends**: in-memory (`DashMap`) and RocksDB (feature `rocksdb`)
//! - **Wire format**: JSON record with a SHA-256 integrity digest
//!
//! # Invariants
//!
//! - Write-once keys: a transaction id is committed at most once
//! - Read-your-writes within a single invocation
//! - Records are immutable once written

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod metrics;
pub mod store;
#[cfg(feature = "rocksdb")]
pub mod storage;
pub mod types;

// Re-exports
pub use config::{LedgerBackend, LedgerConfig};
pub use error::{Error, Result};
pub use metrics::{LedgerMetrics, MeteredStore};
pub use store::{open_store, LedgerStore, MemoryLedger};
#[cfg(feature = "rocksdb")]
pub use storage::RocksLedger;
pub use types::{CurrencyCode, TransferRecord};
