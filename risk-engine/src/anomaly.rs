//! Amount anomaly heuristic
//!
//! A transfer is suspicious when it exceeds the client's historical average
//! by more than a fixed multiplier. This is a policy constant, not a
//! statistical model.

use crate::{Error, Result};
use rust_decimal::Decimal;

/// Anomaly policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnomalyPolicy {
    /// Multiple of the average above which an amount is flagged
    multiplier: Decimal,
}

impl Default for AnomalyPolicy {
    fn default() -> Self {
        Self {
            multiplier: Self::default_multiplier(),
        }
    }
}

impl AnomalyPolicy {
    /// The 1.5x rule
    pub fn default_multiplier() -> Decimal {
        Decimal::new(15, 1)
    }

    /// Create policy with a custom multiplier
    pub fn new(multiplier: Decimal) -> Result<Self> {
        if multiplier <= Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "anomaly multiplier must be positive, got {}",
                multiplier
            )));
        }
        Ok(Self { multiplier })
    }

    /// Configured multiplier
    pub fn multiplier(&self) -> Decimal {
        self.multiplier
    }

    /// Largest amount accepted for a client with the given average, `None`
    /// when the product exceeds `Decimal::MAX` and nothing can be flagged
    pub fn threshold(&self, average: Decimal) -> Option<Decimal> {
        average.checked_mul(self.multiplier)
    }

    /// Check amount against the client's average
    pub fn check(&self, amount: Decimal, average: Decimal) -> Result<()> {
        match self.threshold(average) {
            Some(threshold) if amount > threshold => {
                Err(Error::SuspiciousAmount { amount, threshold })
            }
            _ => Ok(()),
        }
    }
}
