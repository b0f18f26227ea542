//! ExchangeRate-API rate source.
//!
//! Fetches fiat rates from the ExchangeRate-API v6 `latest` endpoint.
//! The endpoint requires an API key; a source configured without one
//! short-circuits to an empty mapping with a warning so sibling sources
//! can still run.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::RateSourceError;
use crate::models::{CurrencyPair, PairRates};
use crate::source::RateSource;

const BASE_URL: &str = "https://v6.exchangerate-api.com/v6";
const SOURCE_ID: &str = "exchangerate";

/// Configuration for the ExchangeRate-API source.
#[derive(Debug, Clone)]
pub struct ExchangeRateApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Fiat codes this source is responsible for (e.g. "EUR").
    pub currencies: Vec<String>,
    /// Base side of the upstream request and quote side of emitted pairs.
    pub base_currency: String,
    pub timeout: Duration,
}

impl Default for ExchangeRateApiConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            api_key: None,
            currencies: vec![
                "EUR".to_string(),
                "RUB".to_string(),
                "GBP".to_string(),
                "JPY".to_string(),
            ],
            base_currency: "USD".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// `latest` endpoint payload.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rates: HashMap<String, Decimal>,
}

/// ExchangeRate-API v6 client.
pub struct ExchangeRateApiSource {
    client: Client,
    config: ExchangeRateApiConfig,
}

impl ExchangeRateApiSource {
    pub fn new(config: ExchangeRateApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    async fn fetch_latest(&self, api_key: &str) -> Result<LatestResponse, RateSourceError> {
        let url = format!(
            "{}/{}/latest/{}",
            self.config.base_url, api_key, self.config.base_currency
        );

        debug!(
            "ExchangeRate-API request: {}",
            url.replace(api_key, "***")
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
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

        let payload: LatestResponse =
            serde_json::from_str(&text).map_err(|e| RateSourceError::Parse {
                provider: SOURCE_ID.to_string(),
                message: e.to_string(),
            })?;

        if payload.result != "success" {
            return Err(RateSourceError::Api {
                provider: SOURCE_ID.to_string(),
                message: payload
                    .error_type
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        Ok(payload)
    }

    /// Picks the configured fiat codes out of the conversion table.
    fn to_pair_rates(&self, payload: &LatestResponse) -> PairRates {
        let mut rates = PairRates::new();

        for code in &self.config.currencies {
            let Some(rate) = payload.conversion_rates.get(code) else {
                debug!("ExchangeRate-API payload has no rate for '{}'", code);
                continue;
            };

            match CurrencyPair::new(code, &self.config.base_currency) {
                Ok(pair) => {
                    rates.insert(pair, *rate);
                }
                Err(e) => warn!("Skipping misconfigured fiat currency: {}", e),
            }
        }

        rates
    }
}

#[async_trait]
impl RateSource for ExchangeRateApiSource {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    async fn fetch_rates(&self) -> Result<PairRates, RateSourceError> {
        let Some(api_key) = self.config.api_key.clone() else {
            warn!("ExchangeRate-API key not configured, returning no fiat rates");
            return Ok(PairRates::new());
        };

        let payload = self.fetch_latest(&api_key).await?;
        let rates = self.to_pair_rates(&payload);

        info!("Fetched {} fiat rates from ExchangeRate-API", rates.len());
        Ok(rates)
    }
}
