//! Metrics collection for observability
//!
//! # Metrics
//!
//! - `ledger_reads_total` - Total number of `get` calls
//! - `ledger_writes_total` - Total number of records written
//! - `ledger_write_conflicts_total` - Conditional writes that found the key taken
//! - `ledger_errors_total` - Backend failures

use crate::{store::LedgerStore, Result};
use prometheus::{IntCounter, Registry};

/// Ledger metrics collector
#[derive(Clone)]
pub struct LedgerMetrics {
    /// Total reads
    pub reads_total: IntCounter,

    /// Total successful writes
    pub writes_total: IntCounter,

    /// Conditional writes rejected because the key existed
    pub write_conflicts_total: IntCounter,

    /// Backend errors
    pub errors_total: IntCounter,
}

impl std::fmt::Debug for LedgerMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerMetrics")
            .field("reads_total", &self.reads_total.get())
            .field("writes_total", &self.writes_total.get())
            .field("write_conflicts_total", &self.write_conflicts_total.get())
            .field("errors_total", &self.errors_total.get())
            .finish()
    }
}

impl LedgerMetrics {
    /// Create counters and register them in `registry`
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let reads_total = IntCounter::new("ledger_reads_total", "Total number of ledger reads")?;
        registry.register(Box::new(reads_total.clone()))?;

        let writes_total =
            IntCounter::new("ledger_writes_total", "Total number of ledger writes")?;
        registry.register(Box::new(writes_total.clone()))?;

        let write_conflicts_total = IntCounter::new(
            "ledger_write_conflicts_total",
            "Conditional writes rejected because the key already existed",
        )?;
        registry.register(Box::new(write_conflicts_total.clone()))?;

        let errors_total = IntCounter::new("ledger_errors_total", "Ledger backend failures")?;
        registry.register(Box::new(errors_total.clone()))?;

        Ok(Self {
            reads_total,
            writes_total,
            write_conflicts_total,
            errors_total,
        })
    }

    fn observe<T>(&self, result: &Result<T>) {
        if result.is_err() {
            self.errors_total.inc();
        }
    }
}

/// Store decorator that counts ledger traffic
#[derive(Debug)]
pub struct MeteredStore<S> {
    inner: S,
    metrics: LedgerMetrics,
}

impl<S: LedgerStore> MeteredStore<S> {
    /// Wrap a store
    pub fn new(inner: S, metrics: LedgerMetrics) -> Self {
        Self { inner, metrics }
    }

    /// Collected metrics
    pub fn metrics(&self) -> &LedgerMetrics {
        &self.metrics
    }
}

impl<S: LedgerStore> LedgerStore for MeteredStore<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.metrics.reads_total.inc();
        let result = self.inner.get(key);
        self.metrics.observe(&result);
        result
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let result = self.inner.put(key, value);
        self.metrics.observe(&result);
        if result.is_ok() {
            self.metrics.writes_total.inc();
        }
        result
    }

    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        let result = self.inner.put_if_absent(key, value);
        self.metrics.observe(&result);
        match result {
            Ok(true) => self.metrics.writes_total.inc(),
            Ok(false) => self.metrics.write_conflicts_total.inc(),
            Err(_) => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryLedger;

    #[test]
    fn test_metrics_creation() {
        let registry = Registry::new();
        let metrics = LedgerMetrics::new(&registry).unwrap();
        assert_eq!(metrics.reads_total.get(), 0);
        assert_eq!(metrics.writes_total.get(), 0);
        assert_eq!(registry.gather().len(), 4);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = Registry::new();
        LedgerMetrics::new(&registry).unwrap();
        assert!(LedgerMetrics::new(&registry).is_err());
    }

    #[test]
    fn test_metered_store_counts() {
        let registry = Registry::new();
        let store = MeteredStore::new(MemoryLedger::new(), LedgerMetrics::new(&registry).unwrap());

        store.get("T1").unwrap();
        assert!(store.put_if_absent("T1", b"a").unwrap());
        assert!(!store.put_if_absent("T1", b"b").unwrap());
        store.put("T2", b"c").unwrap();

        let metrics = store.metrics();
        assert_eq!(metrics.reads_total.get(), 1);
        assert_eq!(metrics.writes_total.get(), 2);
        assert_eq!(metrics.write_conflicts_total.get(), 1);
        assert_eq!(metrics.errors_total.get(), 0);
    }
}
