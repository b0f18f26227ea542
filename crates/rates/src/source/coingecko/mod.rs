//! CoinGecko rate source.
//!
//! Fetches crypto spot prices from the CoinGecko `/simple/price` endpoint.
//! CoinGecko identifies coins by slug ("bitcoin", "ethereum"), so the
//! config carries a code -> slug map alongside the currency codes this
//! source is responsible for.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use rust_decimal::Decimal;

use crate::errors::RateSourceError;
use crate::models::{CurrencyPair, PairRates};
use crate::source::RateSource;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const SOURCE_ID: &str = "coingecko";

/// Configuration for the CoinGecko source.
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    /// Currency codes this source is responsible for (e.g. "BTC").
    pub currencies: Vec<String>,
    /// Code -> CoinGecko coin slug (e.g. "BTC" -> "bitcoin").
    pub coin_ids: HashMap<String, String>,
    /// Quote side of every emitted pair (e.g. "USD").
    pub quote_currency: String,
    pub timeout: Duration,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        let coin_ids = [
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("LTC", "litecoin"),
            ("ADA", "cardano"),
        ]
        .into_iter()
        .map(|(code, slug)| (code.to_string(), slug.to_string()))
        .collect();

        Self {
            base_url: BASE_URL.to_string(),
            currencies: vec![
                "BTC".to_string(),
                "ETH".to_string(),
                "LTC".to_string(),
                "ADA".to_string(),
            ],
            coin_ids,
            quote_currency: "USD".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// CoinGecko `/simple/price` client.
pub struct CoinGeckoSource {
    client: Client,
    config: CoinGeckoConfig,
}

/// `/simple/price` payload: coin slug -> (quote currency -> price).
type SimplePriceResponse = HashMap<String, HashMap<String, Decimal>>;

impl CoinGeckoSource {
    pub fn new(config: CoinGeckoConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    async fn fetch_simple_price(&self, ids: &str) -> Result<SimplePriceResponse, RateSourceError> {
        let url = format!("{}/simple/price", self.config.base_url);
        let vs_currency = self.config.quote_currency.to_ascii_lowercase();

        debug!("CoinGecko request: ids={}", ids);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ids), ("vs_currencies", vs_currency.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RateSourceError::Timeout {
                        provider: SOURCE_ID.to_string(),
                    }
                } else {
                    RateSourceError::Network {
                        provider: SOURCE_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateSourceError::Http {
                provider: SOURCE_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateSourceError::Network {
                provider: SOURCE_ID.to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_str(&text).map_err(|e| RateSourceError::Parse {
            provider: SOURCE_ID.to_string(),
            message: e.to_string(),
        })
    }

    /// Maps the slug-keyed payload back onto the configured currency codes.
    fn to_pair_rates(&self, payload: &SimplePriceResponse) -> PairRates {
        let vs_currency = self.config.quote_currency.to_ascii_lowercase();
        let mut rates = PairRates::new();

        for code in &self.config.currencies {
            let Some(slug) = self.config.coin_ids.get(code) else {
                warn!("No CoinGecko id configured for '{}', skipping", code);
                continue;
            };

            let Some(price) = payload.get(slug).and_then(|q| q.get(&vs_currency)) else {
                debug!("CoinGecko payload has no {} price for '{}'", vs_currency, slug);
                continue;
            };

            match CurrencyPair::new(code, &self.config.quote_currency) {
                Ok(pair) => {
                    rates.insert(pair, *price);
                }
                Err(e) => warn!("Skipping misconfigured CoinGecko currency: {}", e),
            }
        }

        rates
    }
}

#[async_trait]
impl RateSource for CoinGeckoSource {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    async fn fetch_rates(&self) -> Result<PairRates, RateSourceError> {
        let ids: Vec<&str> = self
            .config
            .currencies
            .iter()
            .filter_map(|code| self.config.coin_ids.get(code).map(String::as_str))
            .collect();

        if ids.is_empty() {
            warn!("CoinGecko source has no configured coins");
            return Ok(PairRates::new());
        }

        let payload = self.fetch_simple_price(&ids.join(",")).await?;
        let rates = self.to_pair_rates(&payload);

        info!("Fetched {} crypto rates from CoinGecko", rates.len());
        Ok(rates)
    }
}
