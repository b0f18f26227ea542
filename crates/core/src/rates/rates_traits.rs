use async_trait::async_trait;
use rust_decimal::Decimal;

use super::rates_model::{RateCacheSnapshot, RateHistoryRecord};
use crate::errors::Result;

/// Contract for the durable rate cache store.
///
/// This store is the single source of truth for "latest known rate" and
/// "what was observed historically". It does not enforce freshness; that
/// policy lives in the read service above it.
#[async_trait]
pub trait RateCacheRepositoryTrait: Send + Sync {
    /// Returns the current snapshot, or an empty default when nothing has
    /// been persisted yet. Never fails for "not found".
    fn load_current(&self) -> Result<RateCacheSnapshot>;

    /// Atomically replaces the durable current snapshot. Concurrent
    /// readers must never observe a half-written record.
    async fn save_current(&self, snapshot: &RateCacheSnapshot) -> Result<()>;

    /// Appends immutable history records in slice order. Prior entries
    /// are never rewritten.
    async fn append_history(&self, records: &[RateHistoryRecord]) -> Result<()>;
}

/// Contract for the read-side exchange rate facade.
pub trait ExchangeRateServiceTrait: Send + Sync {
    /// Looks up the cached rate from one currency to another.
    ///
    /// Both codes are case-normalized. `from == to` returns the identity
    /// rate `Some(1)` directly, independent of cache contents. A missing
    /// pair reads as `Ok(None)` ("valuation unavailable"), never an error.
    fn get_rate(&self, from: &str, to: &str) -> Result<Option<Decimal>>;

    /// Returns the full current snapshot, including `last_refresh` and
    /// origin, for callers that want provenance alongside rates.
    fn get_rates(&self) -> Result<RateCacheSnapshot>;
}
