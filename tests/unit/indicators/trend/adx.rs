//! Unit tests for ADX indicator

use chrono::Utc;
use fxsignal::indicators::trend::{calculate_adx, calculate_adx_default};
use fxsignal::models::Candle;

fn create_trend_candles(count: usize, step: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let price = 100.0 + i as f64 * step;
            Candle::new(price, price + 0.3, price - 0.3, price, 1000.0, Utc::now())
        })
        .collect()
}

#[test]
fn test_adx_insufficient_data() {
    let candles = create_trend_candles(20, 0.5);
    assert!(calculate_adx(&candles, 14).is_none());
}

#[test]
fn test_adx_strong_uptrend() {
    let candles = create_trend_candles(100, 0.5);
    let adx = calculate_adx_default(&candles).unwrap();
    assert!(adx.value > 20.0);
    assert!(adx.plus_di > adx.minus_di);
    assert_eq!(adx.period, 14);
}

#[test]
fn test_adx_strong_downtrend() {
    let candles = create_trend_candles(100, -0.5);
    let adx = calculate_adx_default(&candles).unwrap();
    assert!(adx.value > 20.0);
    assert!(adx.minus_di > adx.plus_di);
}

#[test]
fn test_adx_flat_market_is_zero() {
    let candles = create_trend_candles(60, 0.0);
    let adx = calculate_adx_default(&candles).unwrap();
    assert_eq!(adx.value, 0.0);
}
