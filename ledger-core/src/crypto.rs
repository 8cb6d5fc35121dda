//! Record digests
//!
//! A transfer record is hashed over a canonical byte encoding: fixed field
//! order, length-prefixed strings, normalized decimals and nanosecond
//! RFC 3339 timestamps. The JSON layout never feeds the hash, so field
//! aliases and whitespace do not change the digest.

use crate::types::TransferRecord;
use chrono::SecondsFormat;
use sha2::{Digest, Sha256};

/// Canonical encoder for hashing
#[derive(Debug, Default)]
struct CanonicalWriter {
    buffer: Vec<u8>,
}

impl CanonicalWriter {
    fn write_string(&mut self, s: &str) {
        let bytes = s.as_bytes();
        self.buffer.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        self.buffer.extend_from_slice(bytes);
    }

    fn finish(self) -> Vec<u8> {
        self.buffer
    }
}

/// Canonical bytes of a record
pub fn canonical_bytes(record: &TransferRecord) -> Vec<u8> {
    let mut writer = CanonicalWriter::default();
    writer.write_string(&record.client_id);
    writer.write_string(&record.amount.normalize().to_string());
    writer.write_string(&record.destination);
    writer.write_string(record.destination_currency.code());
    writer.write_string(&record.transaction_id);
    writer.write_string(&record.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true));
    writer.finish()
}

/// SHA-256 of the canonical encoding
pub fn record_digest(record: &TransferRecord) -> [u8; 32] {
    hash_bytes(&canonical_bytes(record))
}

/// SHA-256 hash of arbitrary bytes
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
