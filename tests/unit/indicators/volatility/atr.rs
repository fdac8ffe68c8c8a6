//! Unit tests for ATR indicator

use chrono::Utc;
use fxsignal::indicators::volatility::{calculate_atr, calculate_atr_default};
use fxsignal::models::Candle;

fn create_constant_range_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|_| Candle::new(100.0, 100.5, 99.5, 100.0, 1000.0, Utc::now()))
        .collect()
}

#[test]
fn test_atr_insufficient_data() {
    let candles = create_constant_range_candles(14);
    assert!(calculate_atr(&candles, 14).is_none());
}

#[test]
fn test_atr_constant_range() {
    let candles = create_constant_range_candles(40);
    let atr = calculate_atr_default(&candles).unwrap();
    assert!((atr.value - 1.0).abs() < 1e-9);
    assert_eq!(atr.period, 14);
}

#[test]
fn test_atr_grows_with_gaps() {
    let mut candles = create_constant_range_candles(40);
    candles.push(Candle::new(105.0, 105.5, 104.5, 105.0, 1000.0, Utc::now()));
    let atr = calculate_atr_default(&candles).unwrap();
    assert!(atr.value > 1.0);
}
