//! Swing pivots and what can be read from them.

use crate::models::Candle;

pub const DEFAULT_PIVOT_LEFT: usize = 3;
pub const DEFAULT_PIVOT_RIGHT: usize = 3;

/// Indices of candles whose high is the highest of the surrounding window.
pub fn pivot_highs(candles: &[Candle], left: usize, right: usize) -> Vec<usize> {
    pivots(candles, left, right, |c| c.high, |a, b| a >= b)
}

/// Indices of candles whose low is the lowest of the surrounding window.
pub fn pivot_lows(candles: &[Candle], left: usize, right: usize) -> Vec<usize> {
    pivots(candles, left, right, |c| c.low, |a, b| a <= b)
}

fn pivots(
    candles: &[Candle],
    left: usize,
    right: usize,
    value: impl Fn(&Candle) -> f64,
    dominates: impl Fn(f64, f64) -> bool,
) -> Vec<usize> {
    if candles.len() < left + right + 1 {
        return Vec::new();
    }

    (left..candles.len() - right)
        .filter(|&i| {
            let v = value(&candles[i]);
            candles[i - left..=i + right]
                .iter()
                .enumerate()
                .all(|(offset, c)| offset == left || dominates(v, value(c)))
        })
        .collect()
}

/// Price made a lower low while RSI made a higher low across the last two pivot lows.
pub fn rsi_bullish_divergence(candles: &[Candle], rsi: &[f64], left: usize, right: usize) -> bool {
    let lows = pivot_lows(candles, left, right);
    let [.., a, b] = lows.as_slice() else {
        return false;
    };
    match (rsi.get(*a), rsi.get(*b)) {
        (Some(ra), Some(rb)) => candles[*b].low < candles[*a].low && rb > ra,
        _ => false,
    }
}

/// Price made a higher high while RSI made a lower high across the last two pivot highs.
pub fn rsi_bearish_divergence(candles: &[Candle], rsi: &[f64], left: usize, right: usize) -> bool {
    let highs = pivot_highs(candles, left, right);
    let [.., a, b] = highs.as_slice() else {
        return false;
    };
    match (rsi.get(*a), rsi.get(*b)) {
        (Some(ra), Some(rb)) => candles[*b].high > candles[*a].high && rb < ra,
        _ => false,
    }
}

/// Last close broke above the last two pivot highs or below the last two pivot lows.
pub fn support_resistance_break(candles: &[Candle], left: usize, right: usize) -> bool {
    let Some(last) = candles.last() else {
        return false;
    };

    let highs = pivot_highs(candles, left, right);
    let lows = pivot_lows(candles, left, right);

    let broke_up = highs
        .iter()
        .rev()
        .take(2)
        .map(|&i| candles[i].high)
        .reduce(f64::max)
        .is_some_and(|level| last.close > level);

    let broke_down = lows
        .iter()
        .rev()
        .take(2)
        .map(|&i| candles[i].low)
        .reduce(f64::min)
        .is_some_and(|level| last.close < level);

    broke_up || broke_down
}
