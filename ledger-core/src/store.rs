//! Ledger store interface
//!
//! The ledger is an external key-value collaborator keyed by transaction id.
//! Persistence and ordering belong to the backend; callers only see `get`,
//! `put` and the conditional `put_if_absent`.
//!
//! The default `put_if_absent` is a plain get-then-put and is only race-free
//! when the backend already serializes writes to the same key. Backends that
//! can be reached by concurrent writers override it with an atomic version.

use crate::{
    config::{LedgerBackend, LedgerConfig},
    error::Result,
};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

/// Key-value ledger keyed by transaction id
pub trait LedgerStore: Send + Sync {
    /// Read the value stored at `key`
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` at `key`, replacing any previous value
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Write `value` only if `key` is vacant. Returns `false` when the key
    /// was already taken and nothing was written.
    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        if self.get(key)?.is_some() {
            return Ok(false);
        }
        self.put(key, value)?;
        Ok(true)
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        (**self).put_if_absent(key, value)
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        (**self).put_if_absent(key, value)
    }
}

/// In-memory ledger
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryLedger {
    /// Create empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been written
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl LedgerStore for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value.to_vec());
                Ok(true)
            }
        }
    }
}

/// Open the backend named by the configuration
pub fn open_store(config: &LedgerConfig) -> Result<Arc<dyn LedgerStore>> {
    match config.backend {
        LedgerBackend::Memory => {
            tracing::info!("Using in-memory ledger");
            Ok(Arc::new(MemoryLedger::new()))
        }
        #[cfg(feature = "rocksdb")]
        LedgerBackend::RocksDb => Ok(Arc::new(crate::storage::RocksLedger::open(config)?)),
        #[cfg(not(feature = "rocksdb"))]
        LedgerBackend::RocksDb => Err(crate::Error::Config(
            "RocksDB backend requested but ledger-core was built without the `rocksdb` feature"
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_get_missing() {
        let ledger = MemoryLedger::new();
        assert!(ledger.get("T1").unwrap().is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let ledger = MemoryLedger::new();
        ledger.put("T1", b"record").unwrap();
        assert_eq!(ledger.get("T1").unwrap().as_deref(), Some(&b"record"[..]));
        assert_eq!(ledger.keys(), vec!["T1".to_string()]);
    }

    #[test]
    fn test_put_if_absent_keeps_first_value() {
        let ledger = MemoryLedger::new();
        assert!(ledger.put_if_absent("T1", b"first").unwrap());
        assert!(!ledger.put_if_absent("T1", b"second").unwrap());
        assert_eq!(ledger.get("T1").unwrap().as_deref(), Some(&b"first"[..]));
    }

    #[test]
    fn test_concurrent_put_if_absent_single_winner() {
        let ledger = Arc::new(MemoryLedger::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = ledger.clone();
                let winners = winners.clone();
                thread::spawn(move || {
                    if ledger.put_if_absent("T1", format!("writer-{}", i).as_bytes()).unwrap() {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert_eq!(ledger.len(), 1);
    }

    /// Store that relies on the trait's default conditional put
    #[derive(Default)]
    struct PlainStore(MemoryLedger);

    impl LedgerStore for PlainStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.0.get(key)
        }

        fn put(&self, key: &str, value: &[u8]) -> Result<()> {
            self.0.put(key, value)
        }
    }

    #[test]
    fn test_default_put_if_absent() {
        let store = PlainStore::default();
        assert!(store.put_if_absent("T1", b"a").unwrap());
        assert!(!store.put_if_absent("T1", b"b").unwrap());
        assert_eq!(store.get("T1").unwrap().as_deref(), Some(&b"a"[..]));
    }

    #[test]
    fn test_open_memory_store() {
        let store = open_store(&LedgerConfig::default()).unwrap();
        store.put("k", b"v").unwrap();
        assert!(store.get("k").unwrap().is_some());
    }

    #[cfg(not(feature = "rocksdb"))]
    #[test]
    fn test_open_rocksdb_without_feature() {
        use crate::Error;

        let config = LedgerConfig {
            backend: LedgerBackend::RocksDb,
            ..Default::default()
        };
        assert!(matches!(open_store(&config), Err(Error::Config(_))));
    }
}
