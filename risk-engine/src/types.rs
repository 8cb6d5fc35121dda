//! Core types for risk engine

use ledger_core::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One directed conversion rate
///
/// With `reciprocal` set the effective rate is `1 / rate`, which lets a
/// table state `EUR -> USD` as the literal `1/0.93`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Source currency
    pub from: CurrencyCode,

    /// Target currency
    pub to: CurrencyCode,

    /// Rate literal
    pub rate: Decimal,

    /// Interpret `rate` as a divisor
    #[serde(default)]
    pub reciprocal: bool,
}

impl RateEntry {
    /// Multiplying rate
    pub fn direct(from: CurrencyCode, to: CurrencyCode, rate: Decimal) -> Self {
        Self {
            from,
            to,
            rate,
            reciprocal: false,
        }
    }

    /// Dividing rate (`1 / divisor`)
    pub fn reciprocal(from: CurrencyCode, to: CurrencyCode, divisor: Decimal) -> Self {
        Self {
            from,
            to,
            rate: divisor,
            reciprocal: true,
        }
    }

    /// Effective multiplier, `None` for a zero divisor
    pub fn effective_rate(&self) -> Option<Decimal> {
        if self.reciprocal {
            Decimal::ONE.checked_div(self.rate)
        } else {
            Some(self.rate)
        }
    }
}
