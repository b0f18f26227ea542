//! Explicit currency registry handle.
//!
//! Seeded once at process start and passed to whoever validates currency
//! codes; there is no global registry state.

use std::collections::HashMap;

use valutahub_rates::models::normalize_code;

use super::currencies_model::CurrencyInfo;
use crate::errors::{LedgerError, Result};

/// Lookup table of registered currencies, keyed by normalized code.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    currencies: HashMap<String, CurrencyInfo>,
}

impl CurrencyRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry seeded with the stock fiat and crypto set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        let fiats = [
            ("US Dollar", "USD", "United States"),
            ("Euro", "EUR", "Eurozone"),
            ("Russian Ruble", "RUB", "Russia"),
            ("British Pound", "GBP", "United Kingdom"),
            ("Japanese Yen", "JPY", "Japan"),
        ];

        let cryptos = [
            ("Bitcoin", "BTC", "SHA-256", 1.12e12),
            ("Ethereum", "ETH", "Ethash", 4.5e11),
            ("Litecoin", "LTC", "Scrypt", 5.8e9),
            ("Cardano", "ADA", "Ouroboros", 1.2e10),
        ];

        for (name, code, country) in fiats {
            // Seed data is static and pre-validated
            if let Ok(info) = CurrencyInfo::fiat(name, code, country) {
                registry.register(info);
            }
        }

        for (name, code, algorithm, market_cap) in cryptos {
            if let Ok(info) = CurrencyInfo::crypto(name, code, algorithm, market_cap) {
                registry.register(info);
            }
        }

        registry
    }

    /// Registers a currency, replacing any previous entry for the code.
    pub fn register(&mut self, info: CurrencyInfo) {
        self.currencies.insert(info.code.clone(), info);
    }

    /// Resolves a code (case-insensitively) to its registered currency.
    ///
    /// Unknown or malformed codes fail with `CurrencyNotFound`.
    pub fn get(&self, code: &str) -> Result<&CurrencyInfo> {
        let normalized = normalize_code(code)
            .map_err(|_| LedgerError::CurrencyNotFound(code.to_string()))?;
        self.currencies
            .get(&normalized)
            .ok_or_else(|| LedgerError::CurrencyNotFound(normalized).into())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_ok()
    }

    /// All registered currencies, sorted by code.
    pub fn all(&self) -> Vec<&CurrencyInfo> {
        let mut currencies: Vec<_> = self.currencies.values().collect();
        currencies.sort_by(|a, b| a.code.cmp(&b.code));
        currencies
    }
}
