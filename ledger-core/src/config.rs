//! Configuration for the ledger

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ledger backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// Process-local map, lost on exit
    Memory,
    /// RocksDB under `data_dir` (requires the `rocksdb` feature)
    RocksDb,
}

impl std::str::FromStr for LedgerBackend {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(LedgerBackend::Memory),
            "rocksdb" => Ok(LedgerBackend::RocksDb),
            other => Err(crate::Error::Config(format!("Unknown ledger backend: {}", other))),
        }
    }
}

/// Ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Backend to open
    pub backend: LedgerBackend,

    /// Data directory for RocksDB
    pub data_dir: PathBuf,

    /// RocksDB configuration
    pub rocksdb: RocksDBConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::Memory,
            data_dir: PathBuf::from("./data/ledger"),
            rocksdb: RocksDBConfig::default(),
        }
    }
}

/// RocksDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RocksDBConfig {
    /// Write buffer size (MB)
    pub write_buffer_size_mb: usize,

    /// Max write buffers
    pub max_write_buffer_number: i32,

    /// Max background jobs (compaction + flush)
    pub max_background_jobs: i32,

    /// Fsync every write
    pub sync_writes: bool,
}

impl Default for RocksDBConfig {
    fn default() -> Self {
        Self {
            write_buffer_size_mb: 64,
            max_write_buffer_number: 2,
            max_background_jobs: 2,
            sync_writes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert_eq!(config.backend, LedgerBackend::Memory);
        assert!(config.rocksdb.sync_writes);
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("memory".parse::<LedgerBackend>().unwrap(), LedgerBackend::Memory);
        assert_eq!("RocksDB".parse::<LedgerBackend>().unwrap(), LedgerBackend::RocksDb);
        assert!("sled".parse::<LedgerBackend>().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LedgerConfig = serde_json::from_str(r#"{"backend":"rocksdb"}"#).unwrap();
        assert_eq!(config.backend, LedgerBackend::RocksDb);
        assert_eq!(config.rocksdb.max_background_jobs, 2);
    }
}
