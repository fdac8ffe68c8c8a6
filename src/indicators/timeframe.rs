//! Higher-timeframe resampling and confluence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{Candle, Timeframe};

use super::trend::is_stacked_uptrend;

pub const MIN_HIGHER_TIMEFRAME_BARS: usize = 55;

/// Aggregate candles into buckets of `target` length, aligned to the epoch.
pub fn resample(candles: &[Candle], target: Timeframe) -> Vec<Candle> {
    let bucket_secs = target.seconds();
    let mut buckets: BTreeMap<i64, Candle> = BTreeMap::new();

    for c in candles {
        let ts = c.timestamp.timestamp();
        let key = ts - ts.rem_euclid(bucket_secs);
        buckets
            .entry(key)
            .and_modify(|agg| {
                agg.high = agg.high.max(c.high);
                agg.low = agg.low.min(c.low);
                agg.close = c.close;
                agg.volume += c.volume;
            })
            .or_insert_with(|| {
                let start = DateTime::<Utc>::from_timestamp(key, 0).unwrap_or(c.timestamp);
                Candle::new(c.open, c.high, c.low, c.close, c.volume, start)
            });
    }

    buckets.into_values().collect()
}

/// Higher timeframe is in a stacked uptrend (close > EMA20 > EMA50).
///
/// False when the timeframe has no defined higher step or there are fewer than
/// [`MIN_HIGHER_TIMEFRAME_BARS`] resampled bars.
pub fn higher_timeframe_confluence(candles: &[Candle], timeframe: Timeframe) -> bool {
    let Some(higher) = timeframe.higher() else {
        return false;
    };
    let resampled = resample(candles, higher);
    if resampled.len() < MIN_HIGHER_TIMEFRAME_BARS {
        return false;
    }
    is_stacked_uptrend(&resampled, 20, 50)
}
