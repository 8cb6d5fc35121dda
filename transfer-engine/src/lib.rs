//! Transfer Engine
//!
//! Validates and commits cross-border transfers against a key-value ledger.
//!
//! # Pipeline
//!
//! `create_transaction` runs these checks in order and stops at the first
//! failure:
//!
//! 1. **Idempotency**: the transaction id must not already be committed
//! 2. **Client**: the originating client must be registered
//! 3. **Funds**: the amount may not exceed the client's balance
//! 4. **Sanctions**: the destination must not be listed
//! 5. **Anomaly**: the amount may not exceed 1.5x the client's average
//! 6. **Conversion**: home currency to destination currency
//! 7. **Commit**: write-once under the transaction id
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use ledger_core::{CurrencyCode, MemoryLedger};
//! use rust_decimal::Decimal;
//! use transfer_engine::{Config, Invocation, TransactionProcessor, TransferRequest};
//!
//! fn main() -> transfer_engine::Result<()> {
//!     let processor = TransactionProcessor::from_config(&Config::default())?;
//!     let ledger = MemoryLedger::new();
//!     let ctx = Invocation::new(&ledger, Utc::now());
//!
//!     let request = TransferRequest::new("C002", Decimal::from(10), CurrencyCode::COP, "acme", "T1");
//!     let record = processor.create_transaction(&ctx, &request)?;
//!     println!("{} {}", record.amount, record.destination_currency);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod processor;
pub mod registry;
pub mod types;

// Re-exports
pub use config::Config;
pub use context::{Invocation, TransactionContext};
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use processor::TransactionProcessor;
pub use registry::ClientRegistry;
pub use types::{Client, TransferRequest};

pub use ledger_core::{CurrencyCode, TransferRecord};
