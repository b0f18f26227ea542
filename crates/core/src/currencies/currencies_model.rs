//! Currency domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use valutahub_rates::models::normalize_code;

/// What kind of currency a code denotes, with kind-specific metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CurrencyKind {
    #[serde(rename_all = "camelCase")]
    Fiat { issuing_country: String },
    #[serde(rename_all = "camelCase")]
    Crypto { algorithm: String, market_cap: f64 },
}

/// Static metadata for one registered currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    pub code: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: CurrencyKind,
}

impl CurrencyInfo {
    pub fn fiat(name: &str, code: &str, issuing_country: &str) -> Result<Self> {
        Ok(Self {
            code: validate(name, code)?,
            name: name.to_string(),
            kind: CurrencyKind::Fiat {
                issuing_country: issuing_country.to_string(),
            },
        })
    }

    pub fn crypto(name: &str, code: &str, algorithm: &str, market_cap: f64) -> Result<Self> {
        Ok(Self {
            code: validate(name, code)?,
            name: name.to_string(),
            kind: CurrencyKind::Crypto {
                algorithm: algorithm.to_string(),
                market_cap,
            },
        })
    }

    pub fn is_crypto(&self) -> bool {
        matches!(self.kind, CurrencyKind::Crypto { .. })
    }

    /// One-line display string for listings.
    pub fn display_info(&self) -> String {
        match &self.kind {
            CurrencyKind::Fiat { issuing_country } => {
                format!("[FIAT] {} - {} ({})", self.code, self.name, issuing_country)
            }
            CurrencyKind::Crypto {
                algorithm,
                market_cap,
            } => {
                let mcap = if *market_cap > 0.0 {
                    format!("{:.2e}", market_cap)
                } else {
                    "N/A".to_string()
                };
                format!(
                    "[CRYPTO] {} - {} ({}, mcap {})",
                    self.code, self.name, algorithm, mcap
                )
            }
        }
    }
}

fn validate(name: &str, code: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(Error::Validation("currency name cannot be empty".to_string()));
    }
    normalize_code(code).map_err(|e| Error::Validation(e.to_string()))
}
