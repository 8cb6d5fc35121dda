//! Currency conversion over a fixed rate table
//!
//! Rates are directed: `USD -> EUR` and `EUR -> USD` are independent entries
//! and need not be mathematical inverses. A pair missing from the table is
//! an error, never a pass-through.
//!
//! Converted amounts are rounded to the target currency's minor units,
//! midpoint away from zero. Same-currency requests are returned untouched.

use crate::{types::RateEntry, Error, Result};
use ledger_core::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use tracing::debug;

/// Directed conversion rates
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    // Map: (from, to) -> effective multiplier
    rates: HashMap<(CurrencyCode, CurrencyCode), Decimal>,
}

impl RateTable {
    /// Build a table, validating every entry
    pub fn from_entries(entries: impl IntoIterator<Item = RateEntry>) -> Result<Self> {
        let mut rates = HashMap::new();

        for entry in entries {
            if entry.from == entry.to {
                return Err(Error::InvalidConfig(format!(
                    "rate {} -> {} converts a currency to itself",
                    entry.from, entry.to
                )));
            }

            if entry.rate <= Decimal::ZERO {
                return Err(Error::InvalidConfig(format!(
                    "rate {} -> {} must be positive, got {}",
                    entry.from, entry.to, entry.rate
                )));
            }

            let effective = entry.effective_rate().ok_or_else(|| {
                Error::InvalidConfig(format!("rate {} -> {} is not representable", entry.from, entry.to))
            })?;

            if rates.insert((entry.from, entry.to), effective).is_some() {
                return Err(Error::InvalidConfig(format!(
                    "duplicate rate for {} -> {}",
                    entry.from, entry.to
                )));
            }
        }

        Ok(Self { rates })
    }

    /// Reference entries: COP/USD 4000, USD/EUR 0.93, COP/EUR 4250
    pub fn reference_entries() -> Vec<RateEntry> {
        use CurrencyCode::*;

        vec![
            RateEntry::reciprocal(COP, USD, Decimal::from(4000)),
            RateEntry::direct(USD, COP, Decimal::from(4000)),
            RateEntry::direct(USD, EUR, Decimal::new(93, 2)),
            RateEntry::reciprocal(EUR, USD, Decimal::new(93, 2)),
            RateEntry::reciprocal(COP, EUR, Decimal::from(4250)),
            RateEntry::direct(EUR, COP, Decimal::from(4250)),
        ]
    }

    /// Effective rate for the ordered pair
    pub fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Option<Decimal> {
        self.rates.get(&(from, to)).copied()
    }

    /// Defined pairs, sorted
    pub fn pairs(&self) -> Vec<(CurrencyCode, CurrencyCode)> {
        let mut pairs: Vec<_> = self.rates.keys().copied().collect();
        pairs.sort();
        pairs
    }

    /// Number of defined pairs
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no pair is defined
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        // Reference literals are positive, distinct and non-reflexive
        let rates = Self::reference_entries()
            .into_iter()
            .filter_map(|entry| Some(((entry.from, entry.to), entry.effective_rate()?)))
            .collect();
        Self { rates }
    }
}

/// Point-to-point currency converter
#[derive(Debug, Clone, Default)]
pub struct CurrencyConverter {
    table: RateTable,
}

impl CurrencyConverter {
    /// Create converter over a rate table
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// Convert `amount` from one currency to another
    pub fn convert(&self, amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Result<Decimal> {
        if from == to {
            return Ok(amount);
        }

        let rate = self
            .table
            .rate(from, to)
            .ok_or(Error::UnsupportedCurrencyPair { from, to })?;

        let converted = amount
            .checked_mul(rate)
            .ok_or_else(|| Error::Calculation(format!("{} {} x {} overflows", amount, from, rate)))?
            .round_dp_with_strategy(to.minor_units(), RoundingStrategy::MidpointAwayFromZero);

        debug!(%from, %to, %amount, %rate, %converted, "Converted amount");
        Ok(converted)
    }
}
