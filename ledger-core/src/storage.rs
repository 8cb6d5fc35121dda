//! RocksDB ledger backend
//!
//! # Column Families
//!
//! - `transactions` - Committed transfer records (key: transaction id)

use crate::{
    config::LedgerConfig,
    error::{Error, Result},
    store::LedgerStore,
};
use parking_lot::Mutex;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Options, WriteOptions, DB};
use std::sync::Arc;

/// Column family names
const CF_TRANSACTIONS: &str = "transactions";

/// Ledger store backed by RocksDB
pub struct RocksLedger {
    db: Arc<DB>,
    /// Serializes conditional writes so check-then-put is atomic per process
    write_lock: Mutex<()>,
    sync_writes: bool,
}

impl std::fmt::Debug for RocksLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksLedger")
            .field("path", &self.db.path())
            .field("sync_writes", &self.sync_writes)
            .finish()
    }
}

impl RocksLedger {
    /// Open or create database
    pub fn open(config: &LedgerConfig) -> Result<Self> {
        let path = &config.data_dir;

        // Create directory if not exists
        std::fs::create_dir_all(path)?;

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        // Tuning from config
        db_opts.set_write_buffer_size(config.rocksdb.write_buffer_size_mb * 1024 * 1024);
        db_opts.set_max_write_buffer_number(config.rocksdb.max_write_buffer_number);
        db_opts.set_max_background_jobs(config.rocksdb.max_background_jobs);

        let cf_descriptors = vec![ColumnFamilyDescriptor::new(
            CF_TRANSACTIONS,
            Self::cf_options_transactions(),
        )];

        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;

        tracing::info!(path = ?path, "Opened RocksDB ledger");

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
            sync_writes: config.rocksdb.sync_writes,
        })
    }

    fn cf_options_transactions() -> Options {
        let mut opts = Options::default();
        // Point lookups by key dominate, bloom filters pay off
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        opts.set_block_based_table_factory(&block_opts);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
        opts
    }

    fn cf_handle(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_TRANSACTIONS)
            .ok_or_else(|| Error::Storage(format!("Column family {} not found", CF_TRANSACTIONS)))
    }

    fn write_options(&self) -> WriteOptions {
        let mut opts = WriteOptions::default();
        opts.set_sync(self.sync_writes);
        opts
    }
}

impl LedgerStore for RocksLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.cf_handle()?;
        Ok(self.db.get_cf(cf, key.as_bytes())?)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let cf = self.cf_handle()?;
        self.db.put_cf_opt(cf, key.as_bytes(), value, &self.write_options())?;

        tracing::debug!(key, bytes = value.len(), "Record written");
        Ok(())
    }

    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        let _guard = self.write_lock.lock();
        if self.get(key)?.is_some() {
            return Ok(false);
        }
        self.put(key, value)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config() -> (LedgerConfig, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = LedgerConfig {
            backend: crate::LedgerBackend::RocksDb,
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        (config, temp_dir)
    }

    #[test]
    fn test_storage_open() {
        let (config, _temp) = test_config();
        let ledger = RocksLedger::open(&config).unwrap();
        assert!(ledger.db.cf_handle(CF_TRANSACTIONS).is_some());
    }

    #[test]
    fn test_put_and_get() {
        let (config, _temp) = test_config();
        let ledger = RocksLedger::open(&config).unwrap();

        assert!(ledger.get("T1").unwrap().is_none());
        ledger.put("T1", b"record").unwrap();
        assert_eq!(ledger.get("T1").unwrap().as_deref(), Some(&b"record"[..]));
    }

    #[test]
    fn test_put_if_absent() {
        let (config, _temp) = test_config();
        let ledger = RocksLedger::open(&config).unwrap();

        assert!(ledger.put_if_absent("T1", b"first").unwrap());
        assert!(!ledger.put_if_absent("T1", b"second").unwrap());
        assert_eq!(ledger.get("T1").unwrap().as_deref(), Some(&b"first"[..]));
    }

    #[test]
    fn test_records_survive_reopen() {
        let (config, _temp) = test_config();
        {
            let ledger = RocksLedger::open(&config).unwrap();
            ledger.put("T1", b"record").unwrap();
        }

        let reopened = RocksLedger::open(&config).unwrap();
        assert_eq!(reopened.get("T1").unwrap().as_deref(), Some(&b"record"[..]));
    }
}
