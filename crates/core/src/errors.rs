//! Core error types for the Valutahub application.
//!
//! This module defines storage-agnostic error types. Storage-specific
//! errors (file I/O, JSON decoding) are converted to these types by the
//! storage layer.

use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
///
/// Ledger failures propagate unchanged to the caller, which owns the
/// user-visible messaging; rate source failures are absorbed inside the
/// updater and never appear here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for document store operations.
///
/// Uses `String` details so the storage layer can convert its own error
/// types (I/O, serde) into this format.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading a document failed for a reason other than "not found".
    #[error("failed to read document '{document}': {message}")]
    ReadFailed { document: String, message: String },

    /// Writing or replacing a document failed.
    #[error("failed to write document '{document}': {message}")]
    WriteFailed { document: String, message: String },

    /// A document exists but could not be decoded.
    #[error("failed to decode document '{document}': {message}")]
    DecodeFailed { document: String, message: String },
}

/// Errors raised by portfolio ledger operations.
///
/// Every variant is rejected before any mutation; no failure path leaves
/// a wallet partially updated.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Buy/sell quantity was zero or negative.
    #[error("amount must be positive, got {amount}")]
    InvalidAmount { amount: Decimal },

    /// Sell against a currency the user holds no wallet for.
    #[error("no wallet for currency '{0}'")]
    WalletNotFound(String),

    /// Sell amount exceeds the wallet balance.
    #[error("insufficient funds: available {available} {currency}, required {required} {currency}")]
    InsufficientFunds {
        currency: String,
        available: Decimal,
        required: Decimal,
    },

    /// Reference to a currency code missing from the registry.
    #[error("unknown currency: '{0}'")]
    CurrencyNotFound(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
