//! Sanctions list types

use serde::{Deserialize, Serialize};

/// One blocked destination identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionsEntry {
    /// Blocked identifier, compared case-insensitively
    pub identifier: String,

    /// Originating list (OFAC, EU, local, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,

    /// Free-form reason recorded with the listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SanctionsEntry {
    /// Entry with only an identifier
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            list: None,
            reason: None,
        }
    }
}
