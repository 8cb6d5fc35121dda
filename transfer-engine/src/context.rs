//! Invocation context
//!
//! Everything that differs between invocations of the same logical
//! transaction comes through the context: the ledger handle and the commit
//! timestamp. Every party re-executing a transaction must see the same
//! timestamp, so it is supplied by the caller and never read from the local
//! clock inside the pipeline.

use chrono::{DateTime, Utc};
use ledger_core::LedgerStore;

/// Per-invocation collaborators
pub trait TransactionContext {
    /// Ledger the transaction reads and commits to
    fn ledger(&self) -> &dyn LedgerStore;

    /// Authoritative timestamp for the committed record
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Context built from a ledger handle and a caller-supplied timestamp
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    ledger: &'a dyn LedgerStore,
    timestamp: DateTime<Utc>,
}

impl<'a> Invocation<'a> {
    /// Create context
    pub fn new(ledger: &'a dyn LedgerStore, timestamp: DateTime<Utc>) -> Self {
        Self { ledger, timestamp }
    }
}

impl std::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

impl TransactionContext for Invocation<'_> {
    fn ledger(&self) -> &dyn LedgerStore {
        self.ledger
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
