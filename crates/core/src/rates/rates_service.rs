use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use rust_decimal::Decimal;

use super::rates_model::RateCacheSnapshot;
use super::rates_traits::{ExchangeRateServiceTrait, RateCacheRepositoryTrait};
use crate::errors::Result;
use valutahub_rates::CurrencyPair;

/// Read-side facade over the rate cache store.
///
/// Shields callers from cache-miss and staleness details: lookups return
/// `Option<Decimal>`, and reads never trigger a refresh.
pub struct ExchangeRateService {
    repository: Arc<dyn RateCacheRepositoryTrait>,
    /// Freshness threshold for reads. Entries observed longer ago than
    /// this read as absent. `None` disables the check entirely.
    ttl: Option<Duration>,
}

impl ExchangeRateService {
    pub fn new(repository: Arc<dyn RateCacheRepositoryTrait>, ttl: Option<Duration>) -> Self {
        Self { repository, ttl }
    }

    fn is_stale(&self, quote_age: chrono::Duration) -> bool {
        match self.ttl {
            Some(ttl) => quote_age.to_std().map(|age| age > ttl).unwrap_or(false),
            None => false,
        }
    }
}

impl ExchangeRateServiceTrait for ExchangeRateService {
    fn get_rate(&self, from: &str, to: &str) -> Result<Option<Decimal>> {
        let pair = match CurrencyPair::new(from, to) {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Rate lookup with invalid pair: {}", e);
                return Ok(None);
            }
        };

        if pair.base() == pair.quote() {
            return Ok(Some(Decimal::ONE));
        }

        let snapshot = self.repository.load_current()?;
        let Some(quote) = snapshot.get(&pair) else {
            debug!("No cached rate for {}", pair);
            return Ok(None);
        };

        let age = chrono::Utc::now().signed_duration_since(quote.observed_at);
        if self.is_stale(age) {
            debug!(
                "Cached rate for {} is stale ({}s old), treating as absent",
                pair,
                age.num_seconds()
            );
            return Ok(None);
        }

        Ok(Some(quote.rate))
    }

    fn get_rates(&self) -> Result<RateCacheSnapshot> {
        self.repository.load_current()
    }
}
