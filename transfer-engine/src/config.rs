//! Configuration for the transfer engine
//!
//! Reference data (clients, sanctions, rates) is read once at startup and
//! handed to the processor as immutable values.

use crate::{registry::ClientRegistry, types::Client};
use compliance_service::{sanctions::DEFAULT_SANCTIONED, SanctionsEntry};
use ledger_core::{LedgerBackend, LedgerConfig};
use risk_engine::{AnomalyPolicy, RateEntry, RateTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Transfer engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Ledger backend configuration
    pub ledger: LedgerConfig,

    /// Client directory
    pub clients: Vec<Client>,

    /// Inline sanctions entries
    pub sanctions: Vec<SanctionsEntry>,

    /// CSV sanctions list, replaces `sanctions` when set
    pub sanctions_csv: Option<PathBuf>,

    /// Directed conversion rates
    pub rates: Vec<RateEntry>,

    /// Anomaly threshold as a multiple of the client average
    pub anomaly_multiplier: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "transfer-engine".to_string(),
            ledger: LedgerConfig::default(),
            clients: ClientRegistry::demo_clients(),
            sanctions: vec![SanctionsEntry::new(DEFAULT_SANCTIONED)],
            sanctions_csv: None,
            rates: RateTable::reference_entries(),
            anomaly_multiplier: AnomalyPolicy::default_multiplier(),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// `TRANSFER_CONFIG` file when set, environment otherwise
    pub fn load() -> crate::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    fn load_with(var: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        match var("TRANSFER_CONFIG") {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_file(path)
            }
            None => Self::from_vars(var),
        }
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let mut config = Config::default();

        if let Some(backend) = var("TRANSFER_LEDGER_BACKEND") {
            config.ledger.backend = backend
                .parse::<LedgerBackend>()
                .map_err(|e| crate::Error::Config(e.to_string()))?;
        }

        if let Some(dir) = var("TRANSFER_LEDGER_DIR") {
            config.ledger.data_dir = PathBuf::from(dir);
        }

        if let Some(multiplier) = var("TRANSFER_ANOMALY_MULTIPLIER") {
            config.anomaly_multiplier = multiplier.parse::<Decimal>().map_err(|e| {
                crate::Error::Config(format!("Invalid TRANSFER_ANOMALY_MULTIPLIER: {}", e))
            })?;
        }

        if let Some(path) = var("TRANSFER_SANCTIONS_CSV") {
            config.sanctions_csv = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}
