//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::{AtrIndicator, Candle};

/// Calculate ATR (Average True Range)
///
/// ATR measures market volatility by Wilder-smoothing the true range.
pub fn calculate_atr(candles: &[Candle], period: u32) -> Option<AtrIndicator> {
    if period == 0 || candles.len() < period as usize + 1 {
        return None;
    }

    let tr_values: Vec<f64> = candles
        .windows(2)
        .map(|pair| math::true_range(pair[1].high, pair[1].low, pair[0].close))
        .collect();

    let atr_value = *math::wilder_series(&tr_values, period as usize).last()?;

    Some(AtrIndicator {
        value: atr_value,
        period,
    })
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Option<AtrIndicator> {
    calculate_atr(candles, 14)
}
