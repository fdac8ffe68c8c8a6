//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::{Candle, EmaIndicator};

/// Calculate EMA for a specific period
pub fn calculate_ema(candles: &[Candle], period: u32) -> Option<EmaIndicator> {
    if period == 0 || candles.len() < period as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let ema_value = math::ema(&closes, period as usize)?;

    Some(EmaIndicator {
        value: ema_value,
        period,
    })
}

/// Calculate multiple EMAs at once
pub fn calculate_emas(candles: &[Candle], periods: &[u32]) -> Vec<EmaIndicator> {
    periods
        .iter()
        .filter_map(|&period| calculate_ema(candles, period))
        .collect()
}

/// Compare a fast and a slow EMA: 1 when fast is above, -1 when below, 0 when equal.
pub fn check_ema_cross(candles: &[Candle], fast_period: u32, slow_period: u32) -> Option<i32> {
    let fast_ema = calculate_ema(candles, fast_period)?;
    let slow_ema = calculate_ema(candles, slow_period)?;

    if fast_ema.value > slow_ema.value {
        Some(1)
    } else if fast_ema.value < slow_ema.value {
        Some(-1)
    } else {
        Some(0)
    }
}

/// Close above EMA(fast) above EMA(slow): a stacked uptrend.
pub fn is_stacked_uptrend(candles: &[Candle], fast_period: u32, slow_period: u32) -> bool {
    let (Some(last), Some(fast), Some(slow)) = (
        candles.last(),
        calculate_ema(candles, fast_period),
        calculate_ema(candles, slow_period),
    ) else {
        return false;
    };
    last.close > fast.value && fast.value > slow.value
}
