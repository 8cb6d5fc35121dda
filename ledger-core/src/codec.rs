//! Wire codec for transfer records
//!
//! Records are stored as a JSON object carrying the record fields plus a
//! hex `digest`. Records written before digests existed decode without
//! verification.

use crate::{
    crypto::record_digest,
    error::{Error, Result},
    types::TransferRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct StoredRef<'a> {
    #[serde(flatten)]
    record: &'a TransferRecord,
    digest: String,
}

#[derive(Deserialize)]
struct Stored {
    #[serde(flatten)]
    record: TransferRecord,
    #[serde(default)]
    digest: Option<String>,
}

/// Serialize a record for the ledger
pub fn encode(record: &TransferRecord) -> Result<Vec<u8>> {
    let stored = StoredRef {
        record,
        digest: hex::encode(record_digest(record)),
    };
    Ok(serde_json::to_vec(&stored)?)
}

/// Deserialize and verify a record read from the ledger
pub fn decode(bytes: &[u8]) -> Result<TransferRecord> {
    let stored: Stored = serde_json::from_slice(bytes)?;

    if let Some(digest) = stored.digest {
        let expected = hex::encode(record_digest(&stored.record));
        if !digest.eq_ignore_ascii_case(&expected) {
            return Err(Error::Integrity(format!(
                "digest mismatch for {}: stored {}, computed {}",
                stored.record.transaction_id, digest, expected
            )));
        }
    }

    Ok(stored.record)
}
