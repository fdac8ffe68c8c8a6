//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::{Candle, RsiIndicator};

/// RSI reading for every candle, Wilder smoothed.
///
/// The first candle has no change to measure and reads 50. An average loss of
/// zero reads 100.
pub fn rsi_series(candles: &[Candle], period: u32) -> Vec<f64> {
    if candles.is_empty() {
        return Vec::new();
    }

    let mut gains = Vec::with_capacity(candles.len() - 1);
    let mut losses = Vec::with_capacity(candles.len() - 1);
    for pair in candles.windows(2) {
        let change = pair[1].close - pair[0].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gain = math::wilder_series(&gains, period as usize);
    let avg_loss = math::wilder_series(&losses, period as usize);

    let mut out = Vec::with_capacity(candles.len());
    out.push(50.0);
    for (gain, loss) in avg_gain.iter().zip(avg_loss.iter()) {
        if *loss == 0.0 {
            out.push(100.0);
        } else {
            let rs = gain / loss;
            out.push(100.0 - (100.0 / (1.0 + rs)));
        }
    }
    out
}

/// Calculate RSI indicator
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
pub fn calculate_rsi(candles: &[Candle], period: u32) -> Option<RsiIndicator> {
    if candles.len() < period as usize + 1 {
        return None;
    }

    let value = *rsi_series(candles, period).last()?;
    Some(RsiIndicator {
        value,
        period: Some(period),
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<RsiIndicator> {
    calculate_rsi(candles, 14)
}
