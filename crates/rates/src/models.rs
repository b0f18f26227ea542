//! Currency pair identity and the flat rate mapping sources produce.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Flat mapping of currency pair to rate, as produced by one source.
pub type PairRates = HashMap<CurrencyPair, Decimal>;

/// Errors from constructing or parsing a [`CurrencyPair`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PairParseError {
    #[error("invalid currency code '{0}': expected 2-5 alphabetic characters")]
    InvalidCode(String),

    #[error("invalid pair key '{0}': expected BASE_QUOTE")]
    InvalidKey(String),
}

/// Ordered (base, quote) currency pair.
///
/// Identity is the `"BASE_QUOTE"` key string. Codes are case-normalized
/// to uppercase on construction, so `CurrencyPair::new("btc", "usd")` and
/// `CurrencyPair::new("BTC", "USD")` are the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Builds a pair, validating and uppercasing both codes.
    pub fn new(base: &str, quote: &str) -> Result<Self, PairParseError> {
        Ok(Self {
            base: normalize_code(base)?,
            quote: normalize_code(quote)?,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// The `"BASE_QUOTE"` identity key, e.g. `"BTC_USD"`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.base, self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = PairParseError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (base, quote) = key
            .split_once('_')
            .ok_or_else(|| PairParseError::InvalidKey(key.to_string()))?;
        Self::new(base, quote).map_err(|_| PairParseError::InvalidKey(key.to_string()))
    }
}

impl Serialize for CurrencyPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for CurrencyPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(de::Error::custom)
    }
}

/// Validates a currency code (2-5 alphabetic characters) and uppercases it.
pub fn normalize_code(code: &str) -> Result<String, PairParseError> {
    let trimmed = code.trim();
    if !(2..=5).contains(&trimmed.len()) || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PairParseError::InvalidCode(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}
