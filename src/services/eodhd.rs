//! EODHD intraday provider driven by a URL template.
//!
//! The template may contain `{symbol}`, `{interval}`, `{limit}`, `{apikey}` and
//! `{api_token}` placeholders, e.g.
//! `https://eodhd.com/api/intraday/{symbol}.FOREX?interval={interval}&api_token={api_token}&fmt=json`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::MarketDataError;
use crate::models::{Candle, Timeframe};

use super::market_data::{finalize_series, parse_datetime, parse_number, MarketDataProvider};

const PROVIDER: &str = "eodhd";

pub struct EodhdProvider {
    client: Client,
    url_template: String,
    api_key: Option<String>,
}

impl EodhdProvider {
    pub fn new(url_template: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_else(|_| Client::new()),
            url_template: url_template.into(),
            api_key,
        }
    }
}

/// EODHD intraday intervals: 1m, 5m and 1h.
pub fn eodhd_interval(timeframe: Timeframe) -> Option<&'static str> {
    match timeframe.minutes() {
        1 => Some("1m"),
        5 => Some("5m"),
        60 => Some("1h"),
        _ => None,
    }
}

pub fn render_url(template: &str, symbol: &str, interval: &str, limit: usize, api_key: &str) -> String {
    template
        .replace("{symbol}", symbol)
        .replace("{interval}", interval)
        .replace("{limit}", &limit.to_string())
        .replace("{apikey}", api_key)
        .replace("{api_token}", api_key)
}

fn parse_rows(body: &Value) -> Result<Vec<Candle>, MarketDataError> {
    let rows = body.as_array().ok_or_else(|| MarketDataError::Parse {
        provider: PROVIDER,
        message: "expected a JSON list".to_string(),
    })?;

    rows.iter()
        .map(|row| {
            let field = |key: &str| {
                row.get(key).and_then(parse_number).ok_or_else(|| MarketDataError::Parse {
                    provider: PROVIDER,
                    message: format!("bad `{}` in row", key),
                })
            };
            let timestamp = row
                .get("timestamp")
                .and_then(Value::as_i64)
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .or_else(|| {
                    row.get("datetime")
                        .or_else(|| row.get("date"))
                        .and_then(Value::as_str)
                        .and_then(parse_datetime)
                })
                .ok_or_else(|| MarketDataError::Parse {
                    provider: PROVIDER,
                    message: "row has no timestamp".to_string(),
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
impl MarketDataProvider for EodhdProvider {
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
        let interval = eodhd_interval(timeframe).ok_or(MarketDataError::UnsupportedTimeframe {
            provider: PROVIDER,
            minutes: timeframe.minutes(),
        })?;

        let url = Url::parse(&render_url(
            &self.url_template,
            &symbol.trim().to_uppercase(),
            interval,
            limit,
            api_key,
        ))
        .map_err(|e| MarketDataError::Parse {
            provider: PROVIDER,
            message: format!("invalid URL template: {}", e),
        })?;
        debug!(symbol = %symbol, interval = interval, "Requesting EODHD intraday series");

        let body: Value = self
            .client
            .get(url)
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

        if let Some(message) = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
        {
            return Err(MarketDataError::Api {
                provider: PROVIDER,
                message: message.to_string(),
            });
        }

        Ok(finalize_series(parse_rows(&body)?, limit))
    }
}
