use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use log::{error, info, warn};
use rust_decimal::Decimal;

use super::rates_model::{FetchMeta, RateHistoryRecord, RateQuote};
use super::rates_traits::RateCacheRepositoryTrait;
use crate::constants::UPDATER_ORIGIN;
use crate::errors::Result;
use valutahub_rates::{PairRates, RateSource, SourceRegistry};

/// Fans out to the configured rate sources, merges what succeeded, and
/// commits the merged snapshot plus one history record per fetched pair.
///
/// A single source failing (or timing out) never aborts the batch: its
/// pairs simply keep their previously cached values until it next
/// succeeds.
pub struct RatesUpdater {
    registry: Arc<SourceRegistry>,
    repository: Arc<dyn RateCacheRepositoryTrait>,
}

impl RatesUpdater {
    pub fn new(registry: Arc<SourceRegistry>, repository: Arc<dyn RateCacheRepositoryTrait>) -> Self {
        Self {
            registry,
            repository,
        }
    }

    /// Runs one update cycle over all sources, or over the single named
    /// source when `source_filter` is set.
    ///
    /// Returns the pairs fetched this cycle; an empty map means "nothing
    /// updated" and no snapshot write happened. Unknown source names are
    /// skipped with a warning, never treated as fatal.
    pub async fn run_update(&self, source_filter: Option<&str>) -> Result<PairRates> {
        let working_set: Vec<Arc<dyn RateSource>> = match source_filter {
            Some(name) => match self.registry.get(name) {
                Some(source) => vec![source],
                None => {
                    warn!("Unknown rate source '{}', nothing to update", name);
                    return Ok(PairRates::new());
                }
            },
            None => self.registry.all().to_vec(),
        };

        info!("Starting rates update across {} source(s)", working_set.len());

        // Fetches are independent I/O; run them concurrently and join all
        // outcomes before touching the store. Each source carries its own
        // request timeout, so a hung sibling cannot block the others.
        let fetches = working_set.into_iter().map(|source| async move {
            let started = Instant::now();
            let outcome = source.fetch_rates().await;
            (source.id(), started.elapsed(), outcome)
        });
        let outcomes = join_all(fetches).await;

        let now = Utc::now();
        let mut accumulated = PairRates::new();
        let mut fresh_quotes: Vec<RateQuote> = Vec::new();
        let mut history: Vec<RateHistoryRecord> = Vec::new();

        for (source_id, elapsed, outcome) in outcomes {
            let rates = match outcome {
                Ok(rates) => rates,
                Err(e) => {
                    error!("Rates update from '{}' failed: {}", source_id, e);
                    continue;
                }
            };

            let meta = FetchMeta {
                latency_ms: elapsed.as_millis() as u64,
                status_code: 200,
            };

            info!("Source '{}' returned {} rate(s)", source_id, rates.len());

            for (pair, rate) in rates {
                if rate <= Decimal::ZERO {
                    warn!(
                        "Dropping non-positive rate {} for {} from '{}'",
                        rate, pair, source_id
                    );
                    continue;
                }

                match accumulated.entry(pair) {
                    Entry::Occupied(entry) => {
                        // Sources own disjoint pair families; a duplicate
                        // means a misconfiguration. First writer wins, and
                        // the losing value stays out of history too.
                        warn!(
                            "Pair {} already fetched by an earlier source, keeping the first value",
                            entry.key()
                        );
                    }
                    Entry::Vacant(entry) => {
                        let pair = entry.key().clone();
                        entry.insert(rate);
                        history.push(RateHistoryRecord::new(
                            &pair,
                            rate,
                            source_id,
                            now,
                            meta.clone(),
                        ));
                        fresh_quotes.push(RateQuote {
                            pair,
                            rate,
                            source: source_id.to_string(),
                            observed_at: now,
                        });
                    }
                }
            }
        }

        if !history.is_empty() {
            self.repository.append_history(&history).await?;
        }

        if accumulated.is_empty() {
            warn!("No rates were updated");
            return Ok(accumulated);
        }

        // Union fresh pairs over the cached snapshot so pairs from a
        // source that failed this cycle persist until it next succeeds.
        let mut snapshot = self.repository.load_current()?;
        for quote in fresh_quotes {
            snapshot.insert(quote);
        }
        snapshot.last_refresh = Some(now);
        snapshot.origin = Some(UPDATER_ORIGIN.to_string());

        self.repository.save_current(&snapshot).await?;

        info!(
            "Rates update finished: {} pair(s) fetched, {} cached in total",
            accumulated.len(),
            snapshot.len()
        );

        Ok(accumulated)
    }
}
