//! Core types for the transfer pipeline

use ledger_core::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Registered client
///
/// Reference data: the pipeline reads it but never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client identifier
    pub id: String,

    /// Display name
    pub full_name: String,

    /// Available balance in the home currency
    pub balance: Decimal,

    /// Historical average transfer value in the home currency
    pub average_transaction_value: Decimal,

    /// Currency balances are held in
    pub home_currency: CurrencyCode,
}

/// Incoming transfer request
///
/// `amount` is expressed in the client's home currency; the committed record
/// carries it in `destination_currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Originating client
    pub client_id: String,

    /// Amount in the client's home currency
    pub amount: Decimal,

    /// Currency the beneficiary receives
    pub destination_currency: CurrencyCode,

    /// Beneficiary identifier
    pub destination: String,

    /// Idempotency key, also the ledger key
    pub transaction_id: String,
}

impl TransferRequest {
    /// Create request
    pub fn new(
        client_id: impl Into<String>,
        amount: Decimal,
        destination_currency: CurrencyCode,
        destination: impl Into<String>,
        transaction_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            amount,
            destination_currency,
            destination: destination.into(),
            transaction_id: transaction_id.into(),
        }
    }
}
