//! Core types for the ledger
//!
//! All types are designed for:
//! - Stable JSON wire format (camelCase field names)
//! - Exact arithmetic (Decimal for money)
//! - Immutability once committed

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ISO 4217 currency code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CurrencyCode {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// Colombian Peso
    COP,
}

impl CurrencyCode {
    /// Every supported currency
    pub const ALL: [CurrencyCode; 3] = [CurrencyCode::USD, CurrencyCode::EUR, CurrencyCode::COP];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::USD => "USD",
            CurrencyCode::EUR => "EUR",
            CurrencyCode::COP => "COP",
        }
    }

    /// ISO 4217 minor units (digits after the decimal point)
    pub fn minor_units(&self) -> u32 {
        match self {
            CurrencyCode::USD | CurrencyCode::EUR | CurrencyCode::COP => 2,
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(CurrencyCode::USD),
            "EUR" => Ok(CurrencyCode::EUR),
            "COP" => Ok(CurrencyCode::COP),
            other => Err(crate::Error::UnknownCurrency(other.to_string())),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A committed cross-border transfer.
///
/// Stored under `transaction_id`, which doubles as the idempotency key. The
/// `amount` is already expressed in `destination_currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    /// Originating client
    #[serde(alias = "cliente")]
    pub client_id: String,

    /// Amount in the destination currency
    #[serde(alias = "monto")]
    pub amount: Decimal,

    /// Beneficiary identifier (uninterpreted)
    #[serde(alias = "destino")]
    pub destination: String,

    /// Currency the amount is denominated in
    #[serde(default = "legacy_destination_currency")]
    pub destination_currency: CurrencyCode,

    /// Ledger key and idempotency key
    #[serde(alias = "idTransaccion")]
    pub transaction_id: String,

    /// Timestamp agreed by the invocation context
    pub timestamp: DateTime<Utc>,
}

// Records written before the field existed were always settled in EUR
fn legacy_destination_currency() -> CurrencyCode {
    CurrencyCode::EUR
}
