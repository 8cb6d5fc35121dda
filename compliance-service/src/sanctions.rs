use crate::error::{ComplianceError, Result};
use crate::types::SanctionsEntry;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Identifier listed by default when no list is configured
pub const DEFAULT_SANCTIONED: &str = "entidadSancionada1";

/// SanctionsList holds blocked destination identifiers and answers
/// case-insensitive exact-match queries
#[derive(Debug, Clone)]
pub struct SanctionsList {
    // Map: folded identifier -> entry
    entries: HashMap<String, SanctionsEntry>,
}

impl SanctionsList {
    /// Build from entries. Identifiers differing only by case collapse into
    /// the first one seen.
    pub fn from_entries(entries: impl IntoIterator<Item = SanctionsEntry>) -> Result<Self> {
        let mut map = HashMap::new();

        for entry in entries {
            if entry.identifier.is_empty() {
                return Err(ComplianceError::InvalidInput(
                    "sanctions identifier must not be empty".to_string(),
                ));
            }

            let key = Self::fold(&entry.identifier);
            if map.contains_key(&key) {
                debug!("Duplicate sanctions identifier ignored: {}", entry.identifier);
                continue;
            }
            map.insert(key, entry);
        }

        info!("Loaded sanctions list with {} entries", map.len());
        Ok(Self { entries: map })
    }

    /// Build from bare identifiers
    pub fn from_identifiers<I, S>(identifiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries(identifiers.into_iter().map(SanctionsEntry::new))
    }

    /// Load from CSV with an `identifier` column and optional `list` and
    /// `reason` columns
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let entries = csv_reader
            .deserialize::<SanctionsEntry>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    /// Load from a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            ComplianceError::ConfigError(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_csv_reader(file)
    }

    /// Check if destination is sanctioned
    pub fn is_sanctioned(&self, destination: &str) -> bool {
        self.matched_entry(destination).is_some()
    }

    /// Entry matching the destination, if any
    pub fn matched_entry(&self, destination: &str) -> Option<&SanctionsEntry> {
        self.entries.get(&Self::fold(destination))
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is listed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Simple per-char case fold; no trimming or punctuation stripping.
    // `str::to_lowercase` maps a word-final sigma to `ς`, so the sigma and
    // long-s variants are collapsed onto their plain lowercase letters.
    fn fold(identifier: &str) -> String {
        identifier
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| match c {
                'ς' => 'σ',
                'ſ' => 's',
                other => other,
            })
            .collect()
    }
}

impl Default for SanctionsList {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            Self::fold(DEFAULT_SANCTIONED),
            SanctionsEntry::new(DEFAULT_SANCTIONED),
        );
        Self { entries }
    }
}
