//! Rate cache module - snapshot models, updater, and read service.

mod rates_model;
mod rates_service;
#[cfg(test)]
mod rates_service_tests;
mod rates_traits;
mod updater;
#[cfg(test)]
mod updater_tests;

pub use rates_model::{FetchMeta, RateCacheSnapshot, RateHistoryRecord, RateQuote};
pub use rates_service::ExchangeRateService;
pub use rates_traits::{ExchangeRateServiceTrait, RateCacheRepositoryTrait};
pub use updater::RatesUpdater;
