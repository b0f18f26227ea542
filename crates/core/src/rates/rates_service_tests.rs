use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal_macros::dec;

use super::rates_model::{RateCacheSnapshot, RateHistoryRecord, RateQuote};
use super::rates_service::ExchangeRateService;
use super::rates_traits::{ExchangeRateServiceTrait, RateCacheRepositoryTrait};
use crate::errors::Result;

struct MockRateCacheRepository {
    snapshot: Mutex<RateCacheSnapshot>,
}

impl MockRateCacheRepository {
    fn new(snapshot: RateCacheSnapshot) -> Arc<Self> {
        Arc::new(Self {
            snapshot: Mutex::new(snapshot),
        })
    }
}

#[async_trait]
impl RateCacheRepositoryTrait for MockRateCacheRepository {
    fn load_current(&self) -> Result<RateCacheSnapshot> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn save_current(&self, snapshot: &RateCacheSnapshot) -> Result<()> {
        *self.snapshot.lock().unwrap() = snapshot.clone();
        Ok(())
    }

    async fn append_history(&self, _records: &[RateHistoryRecord]) -> Result<()> {
        Ok(())
    }
}

fn snapshot_with(quotes: Vec<RateQuote>) -> RateCacheSnapshot {
    let mut snapshot = RateCacheSnapshot {
        last_refresh: Some(Utc::now()),
        origin: Some("rates-updater".to_string()),
        ..Default::default()
    };
    for quote in quotes {
        snapshot.insert(quote);
    }
    snapshot
}

fn quote_observed_at(pair: &str, rate: rust_decimal::Decimal, age: chrono::Duration) -> RateQuote {
    RateQuote {
        pair: pair.parse().unwrap(),
        rate,
        source: "coingecko".to_string(),
        observed_at: Utc::now() - age,
    }
}

#[test]
fn same_currency_returns_identity_without_cache() {
    let repository = MockRateCacheRepository::new(RateCacheSnapshot::default());
    let service = ExchangeRateService::new(repository, Some(Duration::from_secs(300)));

    let rate = service.get_rate("usd", "USD").unwrap();
    assert_eq!(rate, Some(dec!(1)));
}

#[test]
fn cached_pair_is_returned() {
    let snapshot = snapshot_with(vec![quote_observed_at(
        "BTC_USD",
        dec!(59337.21),
        chrono::Duration::seconds(5),
    )]);
    let repository = MockRateCacheRepository::new(snapshot);
    let service = ExchangeRateService::new(repository, Some(Duration::from_secs(300)));

    let rate = service.get_rate("btc", "usd").unwrap();
    assert_eq!(rate, Some(dec!(59337.21)));
}

#[test]
fn absent_pair_reads_as_none() {
    let snapshot = snapshot_with(vec![quote_observed_at(
        "BTC_USD",
        dec!(59337.21),
        chrono::Duration::seconds(5),
    )]);
    let repository = MockRateCacheRepository::new(snapshot);
    let service = ExchangeRateService::new(repository, Some(Duration::from_secs(300)));

    assert_eq!(service.get_rate("ETH", "USD").unwrap(), None);
}

#[test]
fn invalid_codes_read_as_none_not_error() {
    let repository = MockRateCacheRepository::new(RateCacheSnapshot::default());
    let service = ExchangeRateService::new(repository, Some(Duration::from_secs(300)));

    assert_eq!(service.get_rate("", "USD").unwrap(), None);
    assert_eq!(service.get_rate("B7C", "USD").unwrap(), None);
    assert_eq!(service.get_rate("TOOLONGCODE", "USD").unwrap(), None);
}

#[test]
fn stale_quote_reads_as_absent() {
    let snapshot = snapshot_with(vec![quote_observed_at(
        "EUR_USD",
        dec!(1.0786),
        chrono::Duration::seconds(600),
    )]);
    let repository = MockRateCacheRepository::new(snapshot);
    let service = ExchangeRateService::new(repository, Some(Duration::from_secs(300)));

    assert_eq!(service.get_rate("EUR", "USD").unwrap(), None);
}

#[test]
fn disabled_ttl_returns_old_quotes() {
    let snapshot = snapshot_with(vec![quote_observed_at(
        "EUR_USD",
        dec!(1.0786),
        chrono::Duration::days(30),
    )]);
    let repository = MockRateCacheRepository::new(snapshot);
    let service = ExchangeRateService::new(repository, None);

    assert_eq!(service.get_rate("EUR", "USD").unwrap(), Some(dec!(1.0786)));
}

#[test]
fn get_rates_exposes_snapshot_provenance() {
    let snapshot = snapshot_with(vec![quote_observed_at(
        "BTC_USD",
        dec!(59337.21),
        chrono::Duration::seconds(5),
    )]);
    let repository = MockRateCacheRepository::new(snapshot);
    let service = ExchangeRateService::new(repository, Some(Duration::from_secs(300)));

    let current = service.get_rates().unwrap();
    assert_eq!(current.len(), 1);
    assert!(current.last_refresh.is_some());
    assert_eq!(current.origin.as_deref(), Some("rates-updater"));
}
