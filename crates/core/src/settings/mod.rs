//! Application settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_CURRENCY, DEFAULT_RATES_TTL_SECS};

/// Deployment-level configuration.
///
/// All fields default so a missing or partial config document still
/// yields a working setup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Currency that valuations and receipt estimates are quoted in.
    pub base_currency: String,
    /// Read-side freshness threshold in seconds. `0` disables the check.
    pub rates_ttl_secs: u64,
    /// Directory the JSON document store lives in.
    pub data_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: BASE_CURRENCY.to_string(),
            rates_ttl_secs: DEFAULT_RATES_TTL_SECS,
            data_dir: "data".to_string(),
        }
    }
}

impl Settings {
    /// TTL as a duration, `None` when the freshness check is disabled.
    pub fn rates_ttl(&self) -> Option<Duration> {
        if self.rates_ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.rates_ttl_secs))
        }
    }
}
