//! TwelveData `time_series` provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::MarketDataError;
use crate::models::{Candle, Timeframe};

use super::market_data::{finalize_series, parse_datetime, parse_number, MarketDataProvider};

const PROVIDER: &str = "twelvedata";
const TWELVEDATA_BASE: &str = "https://api.twelvedata.com";

pub struct TwelveDataProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TwelveDataProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: TWELVEDATA_BASE.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// TwelveData expects `EUR/USD` style pairs for six-letter FX and metals symbols.
pub fn twelvedata_symbol(symbol: &str) -> String {
    let s = symbol.trim().to_uppercase();
    if s.len() == 6 && !s.contains('/') && s.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{}/{}", &s[..3], &s[3..])
    } else {
        s
    }
}

fn parse_values(body: &Value) -> Result<Vec<Candle>, MarketDataError> {
    let values = body
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(|| MarketDataError::Parse {
            provider: PROVIDER,
            message: "missing `values` array".to_string(),
        })?;

    values
        .iter()
        .map(|row| {
            let field = |key: &str| {
                row.get(key).and_then(parse_number).ok_or_else(|| MarketDataError::Parse {
                    provider: PROVIDER,
                    message: format!("bad `{}` in row", key),
                })
            };
            let timestamp = row
                .get("datetime")
                .and_then(Value::as_str)
                .and_then(parse_datetime)
                .ok_or_else(|| MarketDataError::Parse {
                    provider: PROVIDER,
                    message: "bad `datetime` in row".to_string(),
                })?;
            let volume = row.get("volume").and_then(parse_number).unwrap_or(0.0);
            Ok(Candle::new(
                field("open")?,
                field("high")?,
                field("low")?,
                field("close")?,
                volume,
                timestamp,
            ))
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for TwelveDataProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(MarketDataError::MissingApiKey(PROVIDER))?;

        let url = format!("{}/time_series", self.base_url);
        let interval = timeframe.twelvedata_interval();
        let outputsize = limit.clamp(1, 5000).to_string();
        let td_symbol = twelvedata_symbol(symbol);

        debug!(symbol = %td_symbol, interval = %interval, "Requesting TwelveData time series");

        let body: Value = self
            .client
            .get(&url)
            .query(&[
                ("symbol", td_symbol.as_str()),
                ("interval", interval.as_str()),
                ("apikey", api_key),
                ("outputsize", outputsize.as_str()),
                ("format", "JSON"),
            ])
            .send()
            .await
            .map_err(|source| MarketDataError::Http {
                provider: PROVIDER,
                source,
            })?
            .json()
            .await
            .map_err(|source| MarketDataError::Http {
                provider: PROVIDER,
                source,
            })?;

        if body.get("status").and_then(Value::as_str) == Some("error") {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(MarketDataError::Api {
                provider: PROVIDER,
                message,
            });
        }

        Ok(finalize_series(parse_values(&body)?, limit))
    }
}
