//! Market data provider interface and composite providers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::MarketDataError;
use crate::models::{Candle, Timeframe};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Up to `limit` candles, oldest first.
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

/// Never has data.
pub struct PlaceholderMarketDataProvider;

#[async_trait]
impl MarketDataProvider for PlaceholderMarketDataProvider {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn get_candles(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        Ok(Vec::new())
    }
}

/// Tries each provider in order and returns the first non-empty series.
pub struct FallbackMarketDataProvider {
    providers: Vec<Arc<dyn MarketDataProvider>>,
}

impl FallbackMarketDataProvider {
    pub fn new(providers: Vec<Arc<dyn MarketDataProvider>>) -> Self {
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl MarketDataProvider for FallbackMarketDataProvider {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let mut last_error = None;

        for provider in &self.providers {
            match provider.get_candles(symbol, timeframe, limit).await {
                Ok(candles) if !candles.is_empty() => {
                    debug!(
                        provider = provider.name(),
                        symbol = %symbol,
                        count = candles.len(),
                        "Fetched candles"
                    );
                    return Ok(candles);
                }
                Ok(_) => {
                    warn!(provider = provider.name(), symbol = %symbol, "Provider returned no candles");
                }
                Err(e) => {
                    warn!(provider = provider.name(), symbol = %symbol, error = %e, "Provider failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}

/// A JSON number, or a string holding one.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `YYYY-MM-DD HH:MM:SS`, RFC 3339, or a bare date, read as UTC.
pub(crate) fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort oldest first, drop duplicate timestamps, keep the newest `limit`.
pub(crate) fn finalize_series(mut candles: Vec<Candle>, limit: usize) -> Vec<Candle> {
    candles.sort_by_key(|c| c.timestamp);
    candles.dedup_by_key(|c| c.timestamp);
    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }
    candles
}
