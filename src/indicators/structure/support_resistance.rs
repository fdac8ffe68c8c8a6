//! Support and Resistance levels for display

use crate::common::math;
use crate::models::{Candle, PriceLevels};

pub const DEFAULT_LEVELS_LOOKBACK: usize = 48;
pub const DEFAULT_LEVELS_COUNT: usize = 3;

/// Lowest lows (ascending) and highest highs (descending) of the lookback window.
pub fn calculate_support_resistance(candles: &[Candle], lookback: usize, count: usize) -> PriceLevels {
    let start = candles.len().saturating_sub(lookback);
    let recent = &candles[start..];

    let mut lows: Vec<f64> = recent.iter().map(|c| c.low).collect();
    let mut highs: Vec<f64> = recent.iter().map(|c| c.high).collect();

    lows.sort_by(math::cmp_f64);
    lows.dedup();
    highs.sort_by(|a, b| math::cmp_f64(b, a));
    highs.dedup();

    lows.truncate(count);
    highs.truncate(count);

    PriceLevels {
        support: lows,
        resistance: highs,
    }
}

/// Calculate support/resistance with default lookback (48) and three levels per side
pub fn calculate_support_resistance_default(candles: &[Candle]) -> PriceLevels {
    calculate_support_resistance(candles, DEFAULT_LEVELS_LOOKBACK, DEFAULT_LEVELS_COUNT)
}
