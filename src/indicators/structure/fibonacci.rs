//! Fibonacci retracement touch

use crate::models::Candle;

pub const FIB_RATIOS: [f64; 3] = [0.382, 0.5, 0.618];
pub const DEFAULT_FIB_LOOKBACK: usize = 100;
pub const DEFAULT_FIB_ATR_TOLERANCE: f64 = 0.1;

/// Retracement levels of the swing range over the lookback window.
pub fn fibonacci_levels(candles: &[Candle], lookback: usize) -> Option<[f64; 3]> {
    let start = candles.len().saturating_sub(lookback);
    let recent = &candles[start..];
    if recent.is_empty() {
        return None;
    }

    let high = recent.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let low = recent.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    let range = high - low;
    if range <= 0.0 {
        return None;
    }

    Some(FIB_RATIOS.map(|r| high - range * r))
}

/// Last close sits within `tolerance * atr` of a retracement level.
pub fn fibonacci_touch(candles: &[Candle], lookback: usize, atr: f64, tolerance: f64) -> bool {
    let (Some(last), Some(levels)) = (candles.last(), fibonacci_levels(candles, lookback)) else {
        return false;
    };
    if atr <= 0.0 {
        return false;
    }
    let band = atr * tolerance;
    levels.iter().any(|level| (last.close - level).abs() <= band)
}
