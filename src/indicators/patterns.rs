//! Candle patterns read from the last one or two candles.

use crate::models::Candle;

pub const DEFAULT_BIG_BODY_RATIO: f64 = 0.6;

/// Bearish candle followed by a bullish one whose body covers it.
pub fn bullish_engulfing(candles: &[Candle]) -> bool {
    let [.., prev, cur] = candles else {
        return false;
    };
    prev.is_bearish() && cur.is_bullish() && cur.open <= prev.close && cur.close >= prev.open
}

/// Bullish candle followed by a bearish one whose body covers it.
pub fn bearish_engulfing(candles: &[Candle]) -> bool {
    let [.., prev, cur] = candles else {
        return false;
    };
    prev.is_bullish() && cur.is_bearish() && cur.open >= prev.close && cur.close <= prev.open
}

/// Last candle's body is at least `ratio` of its range.
pub fn momentum_body(candles: &[Candle], ratio: f64) -> bool {
    match candles.last() {
        Some(c) if c.range() > 0.0 => c.body() / c.range() >= ratio,
        _ => false,
    }
}
