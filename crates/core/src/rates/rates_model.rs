//! Rate cache domain models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use valutahub_rates::CurrencyPair;

/// The latest observed rate for one pair, with provenance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub pair: CurrencyPair,
    pub rate: Decimal,
    pub source: String,
    pub observed_at: DateTime<Utc>,
}

/// The process-wide "current rates" record.
///
/// One snapshot per deployment, replaced wholesale on every successful
/// update cycle. Pairs a source stopped returning persist from the last
/// cycle that carried them; the updater unions fresh pairs over cached
/// ones before saving.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RateCacheSnapshot {
    /// Latest quote per pair, keyed by the `"BASE_QUOTE"` pair key.
    pub rates: HashMap<String, RateQuote>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub origin: Option<String>,
}

impl RateCacheSnapshot {
    pub fn get(&self, pair: &CurrencyPair) -> Option<&RateQuote> {
        self.rates.get(&pair.key())
    }

    /// Inserts a quote, replacing any cached quote for the same pair.
    pub fn insert(&mut self, quote: RateQuote) {
        self.rates.insert(quote.pair.key(), quote);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Request metadata captured alongside each history record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FetchMeta {
    pub latency_ms: u64,
    pub status_code: u16,
}

/// One immutable fetch observation in the append-only history log.
///
/// Records are never mutated or deleted by this system; retention is out
/// of scope.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateHistoryRecord {
    pub id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub meta: FetchMeta,
}

impl RateHistoryRecord {
    pub fn new(
        pair: &CurrencyPair,
        rate: Decimal,
        source: &str,
        fetched_at: DateTime<Utc>,
        meta: FetchMeta,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from_currency: pair.base().to_string(),
            to_currency: pair.quote().to_string(),
            rate,
            source: source.to_string(),
            fetched_at,
            meta,
        }
    }
}
