//! Valutahub Rates Crate
//!
//! Source-agnostic exchange rate fetching for the Valutahub application.
//!
//! # Overview
//!
//! This crate knows how to talk to external rate providers and nothing else.
//! Each provider implements the [`RateSource`] trait, translating its own
//! response format into a flat [`PairRates`] mapping. Sources are looked up
//! by name through a [`SourceRegistry`] built once at startup.
//!
//! ```text
//! +------------------+
//! |  SourceRegistry  |  (fixed table, keyed by source name)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    RateSource    |  (CoinGecko, ExchangeRate-API, ...)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    PairRates     |  (CurrencyPair -> Decimal)
//! +------------------+
//! ```
//!
//! Caching, history and valuation live in `valutahub-core`; this crate only
//! produces pair mappings or a [`RateSourceError`] describing why one source
//! could not.

pub mod errors;
pub mod models;
pub mod registry;
pub mod source;

pub use errors::RateSourceError;
pub use models::{CurrencyPair, PairParseError, PairRates};
pub use registry::SourceRegistry;
pub use source::coingecko::{CoinGeckoConfig, CoinGeckoSource};
pub use source::exchange_rate_api::{ExchangeRateApiConfig, ExchangeRateApiSource};
pub use source::RateSource;
