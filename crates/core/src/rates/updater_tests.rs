use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::rates_model::{RateCacheSnapshot, RateHistoryRecord, RateQuote};
use super::rates_traits::RateCacheRepositoryTrait;
use super::updater::RatesUpdater;
use crate::errors::Result;
use valutahub_rates::{PairRates, RateSource, RateSourceError, SourceRegistry};

struct StubSource {
    id: &'static str,
    rates: Vec<(&'static str, Decimal)>,
    fail: bool,
}

impl StubSource {
    fn ok(id: &'static str, rates: Vec<(&'static str, Decimal)>) -> Arc<Self> {
        Arc::new(Self {
            id,
            rates,
            fail: false,
        })
    }

    fn failing(id: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            rates: Vec::new(),
            fail: true,
        })
    }
}

#[async_trait]
impl RateSource for StubSource {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn fetch_rates(&self) -> std::result::Result<PairRates, RateSourceError> {
        if self.fail {
            return Err(RateSourceError::Timeout {
                provider: self.id.to_string(),
            });
        }
        let mut rates = PairRates::new();
        for (key, rate) in &self.rates {
            rates.insert(key.parse().unwrap(), *rate);
        }
        Ok(rates)
    }
}

#[derive(Default)]
struct RecordingRepository {
    snapshot: Mutex<RateCacheSnapshot>,
    saves: Mutex<u32>,
    history: Mutex<Vec<RateHistoryRecord>>,
}

impl RecordingRepository {
    fn seeded(quotes: Vec<RateQuote>) -> Arc<Self> {
        let repo = Self::default();
        {
            let mut snapshot = repo.snapshot.lock().unwrap();
            for quote in quotes {
                snapshot.insert(quote);
            }
            snapshot.last_refresh = Some(Utc::now());
        }
        Arc::new(repo)
    }
}

#[async_trait]
impl RateCacheRepositoryTrait for RecordingRepository {
    fn load_current(&self) -> Result<RateCacheSnapshot> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn save_current(&self, snapshot: &RateCacheSnapshot) -> Result<()> {
        *self.snapshot.lock().unwrap() = snapshot.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn append_history(&self, records: &[RateHistoryRecord]) -> Result<()> {
        self.history.lock().unwrap().extend_from_slice(records);
        Ok(())
    }
}

fn updater(
    sources: Vec<Arc<dyn RateSource>>,
    repository: Arc<RecordingRepository>,
) -> RatesUpdater {
    RatesUpdater::new(Arc::new(SourceRegistry::new(sources)), repository)
}

#[tokio::test]
async fn failed_source_does_not_abort_the_cycle() {
    let crypto = StubSource::ok(
        "crypto",
        vec![
            ("BTC_USD", dec!(59337.21)),
            ("ETH_USD", dec!(2410.55)),
            ("LTC_USD", dec!(71.30)),
        ],
    );
    let fiat = StubSource::failing("fiat");
    let repository = RecordingRepository::seeded(vec![RateQuote {
        pair: "EUR_USD".parse().unwrap(),
        rate: dec!(1.0786),
        source: "fiat".to_string(),
        observed_at: Utc::now() - chrono::Duration::hours(3),
    }]);

    let updated = updater(vec![crypto, fiat], repository.clone())
        .run_update(None)
        .await
        .unwrap();

    assert_eq!(updated.len(), 3);
    assert_eq!(updated.get(&"BTC_USD".parse().unwrap()), Some(&dec!(59337.21)));
    assert_eq!(*repository.saves.lock().unwrap(), 1);

    // The failing source's previously cached pair survives the cycle.
    let snapshot = repository.snapshot.lock().unwrap();
    assert_eq!(snapshot.len(), 4);
    let eur = snapshot.get(&"EUR_USD".parse().unwrap()).unwrap();
    assert_eq!(eur.rate, dec!(1.0786));
}

#[tokio::test]
async fn unknown_source_name_is_a_no_op() {
    let crypto = StubSource::ok("crypto", vec![("BTC_USD", dec!(59337.21))]);
    let repository = Arc::new(RecordingRepository::default());

    let updated = updater(vec![crypto], repository.clone())
        .run_update(Some("nasdaq"))
        .await
        .unwrap();

    assert!(updated.is_empty());
    assert_eq!(*repository.saves.lock().unwrap(), 0);
    assert!(repository.history.lock().unwrap().is_empty());
}

#[tokio::test]
async fn all_sources_failing_leaves_the_cache_untouched() {
    let repository = Arc::new(RecordingRepository::default());

    let updated = updater(
        vec![StubSource::failing("crypto"), StubSource::failing("fiat")],
        repository.clone(),
    )
    .run_update(None)
    .await
    .unwrap();

    assert!(updated.is_empty());
    assert_eq!(*repository.saves.lock().unwrap(), 0);
    assert!(repository.history.lock().unwrap().is_empty());
}

#[tokio::test]
async fn source_filter_limits_the_cycle_to_one_source() {
    let crypto = StubSource::ok("crypto", vec![("BTC_USD", dec!(59337.21))]);
    let fiat = StubSource::ok("fiat", vec![("EUR_USD", dec!(1.0786))]);
    let repository = Arc::new(RecordingRepository::default());

    let updated = updater(vec![crypto, fiat], repository.clone())
        .run_update(Some("crypto"))
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    assert!(updated.contains_key(&"BTC_USD".parse().unwrap()));
    assert_eq!(repository.snapshot.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn every_fetched_pair_gets_a_history_record() {
    let crypto = StubSource::ok(
        "crypto",
        vec![("BTC_USD", dec!(59337.21)), ("ETH_USD", dec!(2410.55))],
    );
    let fiat = StubSource::ok("fiat", vec![("EUR_USD", dec!(1.0786))]);
    let repository = Arc::new(RecordingRepository::default());

    updater(vec![crypto, fiat], repository.clone())
        .run_update(None)
        .await
        .unwrap();

    let history = repository.history.lock().unwrap();
    assert_eq!(history.len(), 3);
    assert!(history
        .iter()
        .any(|r| r.from_currency == "EUR" && r.source == "fiat"));
    assert!(history
        .iter()
        .all(|r| r.meta.status_code == 200 && !r.id.is_empty()));
}

#[tokio::test]
async fn duplicate_pair_across_sources_keeps_the_first_value() {
    let primary = StubSource::ok("crypto", vec![("BTC_USD", dec!(59337.21))]);
    let mirror = StubSource::ok("mirror", vec![("BTC_USD", dec!(58000))]);
    let repository = Arc::new(RecordingRepository::default());

    let updated = updater(vec![primary, mirror], repository.clone())
        .run_update(None)
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(
        updated.get(&"BTC_USD".parse().unwrap()),
        Some(&dec!(59337.21))
    );

    // Only the winning observation is cached and logged
    let snapshot = repository.snapshot.lock().unwrap();
    let quote = snapshot.get(&"BTC_USD".parse().unwrap()).unwrap();
    assert_eq!(quote.rate, dec!(59337.21));
    assert_eq!(quote.source, "crypto");

    let history = repository.history.lock().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].source, "crypto");
}

#[tokio::test]
async fn non_positive_rates_are_dropped() {
    let crypto = StubSource::ok(
        "crypto",
        vec![("BTC_USD", dec!(59337.21)), ("ETH_USD", dec!(0))],
    );
    let repository = Arc::new(RecordingRepository::default());

    let updated = updater(vec![crypto], repository.clone())
        .run_update(None)
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    assert!(!updated.contains_key(&"ETH_USD".parse().unwrap()));
    assert_eq!(repository.history.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn snapshot_carries_updater_provenance() {
    let crypto = StubSource::ok("crypto", vec![("BTC_USD", dec!(59337.21))]);
    let repository = Arc::new(RecordingRepository::default());

    updater(vec![crypto], repository.clone())
        .run_update(None)
        .await
        .unwrap();

    let snapshot = repository.snapshot.lock().unwrap();
    assert!(snapshot.last_refresh.is_some());
    assert_eq!(snapshot.origin.as_deref(), Some("rates-updater"));
}
