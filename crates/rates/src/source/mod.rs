//! Rate source trait and concrete provider implementations.

pub mod coingecko;
pub mod exchange_rate_api;

use async_trait::async_trait;

use crate::errors::RateSourceError;
use crate::models::PairRates;

/// A single external rate provider, scoped to one currency family.
///
/// Implementations translate their provider's native response shape into
/// the flat pair mapping themselves; callers never see provider formats.
///
/// An empty mapping is a valid "no data" result, not an error. A source
/// that is missing required credentials must return an empty mapping with
/// a warning rather than fail, so sibling sources are never blocked.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Registry name of this source, e.g. `"coingecko"`.
    fn id(&self) -> &'static str;

    /// Fetches the current rates this source is responsible for.
    async fn fetch_rates(&self) -> Result<PairRates, RateSourceError>;
}
