//! Unit tests for Fibonacci retracement touch

use chrono::Utc;
use fxsignal::indicators::structure::{fibonacci_levels, fibonacci_touch};
use fxsignal::models::Candle;

fn swing_with_close(close: f64) -> Vec<Candle> {
    vec![
        Candle::new(105.0, 110.0, 104.0, 105.0, 1000.0, Utc::now()),
        Candle::new(105.0, 106.0, 100.0, close, 1000.0, Utc::now()),
    ]
}

#[test]
fn test_fibonacci_levels_from_swing() {
    let levels = fibonacci_levels(&swing_with_close(105.0), 100).unwrap();
    assert!((levels[0] - 106.18).abs() < 1e-9);
    assert!((levels[1] - 105.0).abs() < 1e-9);
    assert!((levels[2] - 103.82).abs() < 1e-9);
}

#[test]
fn test_fibonacci_touch_at_midpoint() {
    assert!(fibonacci_touch(&swing_with_close(105.0), 100, 1.0, 0.1));
}

#[test]
fn test_fibonacci_no_touch_away_from_levels() {
    assert!(!fibonacci_touch(&swing_with_close(108.0), 100, 1.0, 0.1));
}

#[test]
fn test_fibonacci_needs_positive_atr() {
    assert!(!fibonacci_touch(&swing_with_close(105.0), 100, 0.0, 0.1));
}

#[test]
fn test_fibonacci_flat_range_has_no_levels() {
    let candles = vec![Candle::new(1.0, 1.0, 1.0, 1.0, 0.0, Utc::now())];
    assert!(fibonacci_levels(&candles, 100).is_none());
}
