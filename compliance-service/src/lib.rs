//! Compliance Service
//!
//! Sanctions screening for transfer destinations. The list is static
//! configuration: it is built once and never mutated afterwards.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod sanctions;
pub mod types;

pub use error::{ComplianceError, Result};
pub use sanctions::SanctionsList;
pub use types::SanctionsEntry;
