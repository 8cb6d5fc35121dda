//! Risk Engine for DelTran
//!
//! Deterministic currency conversion over a fixed rate table and the
//! amount anomaly heuristic applied to outgoing transfers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod anomaly;
pub mod error;
pub mod fx;
pub mod types;

pub use anomaly::AnomalyPolicy;
pub use error::{Error, Result};
pub use fx::{CurrencyConverter, RateTable};
pub use types::RateEntry;
