//! AlphaVantage intraday provider (`FX_INTRADAY` for currency pairs,
//! `TIME_SERIES_INTRADAY` for everything else).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::MarketDataError;
use crate::models::{Candle, Timeframe};

use super::market_data::{finalize_series, parse_datetime, parse_number, MarketDataProvider};

const PROVIDER: &str = "alphavantage";
const ALPHAVANTAGE_BASE: &str = "https://www.alphavantage.co";

pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantageProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: ALPHAVANTAGE_BASE.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Six-letter alphabetic symbols are treated as currency pairs.
pub fn split_fx_pair(symbol: &str) -> Option<(String, String)> {
    let s: String = symbol.trim().to_uppercase().replace('/', "");
    if s.len() == 6 && s.chars().all(|c| c.is_ascii_alphabetic()) {
        Some((s[..3].to_string(), s[3..].to_string()))
    } else {
        None
    }
}

fn parse_series(body: &Value, series_key: &str) -> Result<Vec<Candle>, MarketDataError> {
    let series = body
        .get(series_key)
        .and_then(Value::as_object)
        .ok_or_else(|| MarketDataError::Parse {
            provider: PROVIDER,
            message: format!("missing `{}`", series_key),
        })?;

    series
        .iter()
        .map(|(stamp, row)| {
            let field = |key: &str| {
                row.get(key).and_then(parse_number).ok_or_else(|| MarketDataError::Parse {
                    provider: PROVIDER,
                    message: format!("bad `{}` at {}", key, stamp),
                })
            };
            let timestamp = parse_datetime(stamp).ok_or_else(|| MarketDataError::Parse {
                provider: PROVIDER,
                message: format!("bad timestamp {}", stamp),
            })?;
            let volume = row.get("5. volume").and_then(parse_number).unwrap_or(0.0);
            Ok(Candle::new(
                field("1. open")?,
                field("2. high")?,
                field("3. low")?,
                field("4. close")?,
                volume,
                timestamp,
            ))
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
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
        let interval =
            timeframe
                .alphavantage_interval()
                .ok_or(MarketDataError::UnsupportedTimeframe {
                    provider: PROVIDER,
                    minutes: timeframe.minutes(),
                })?;
        let outputsize = if limit > 100 { "full" } else { "compact" };

        let mut params: Vec<(&str, String)> = vec![
            ("interval", interval.to_string()),
            ("outputsize", outputsize.to_string()),
            ("apikey", api_key.to_string()),
        ];
        let series_key = match split_fx_pair(symbol) {
            Some((from, to)) => {
                params.push(("function", "FX_INTRADAY".to_string()));
                params.push(("from_symbol", from));
                params.push(("to_symbol", to));
                format!("Time Series FX ({})", interval)
            }
            None => {
                params.push(("function", "TIME_SERIES_INTRADAY".to_string()));
                params.push(("symbol", symbol.trim().to_uppercase()));
                format!("Time Series ({})", interval)
            }
        };

        debug!(symbol = %symbol, interval = interval, "Requesting AlphaVantage intraday series");

        let url = format!("{}/query", self.base_url);
        let body: Value = self
            .client
            .get(&url)
            .query(&params)
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

        for key in ["Error Message", "Note", "Information"] {
            if let Some(message) = body.get(key).and_then(Value::as_str) {
                return Err(MarketDataError::Api {
                    provider: PROVIDER,
                    message: message.to_string(),
                });
            }
        }

        Ok(finalize_series(parse_series(&body, &series_key)?, limit))
    }
}
