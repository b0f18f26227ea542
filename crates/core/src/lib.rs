//! Valutahub Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Valutahub: the rate
//! cache and its updater, the read-side exchange rate service, and the
//! portfolio ledger. It is storage-agnostic and defines traits that are
//! implemented by the `storage-json` crate.

pub mod constants;
pub mod currencies;
pub mod errors;
pub mod portfolio;
pub mod rates;
pub mod settings;

// Re-export common types from the rates and portfolio modules
pub use portfolio::*;
pub use rates::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
