//! Unit tests for EMA indicator

use chrono::Utc;
use fxsignal::indicators::trend::{calculate_ema, calculate_emas, check_ema_cross, is_stacked_uptrend};
use fxsignal::models::Candle;

fn create_test_candles(count: usize, base_price: f64, step: f64) -> Vec<Candle> {
    let mut candles = Vec::new();
    for i in 0..count {
        let price = base_price + (i as f64 * step);
        candles.push(Candle::new(
            price,
            price + 0.05,
            price - 0.05,
            price,
            1000.0,
            Utc::now(),
        ));
    }
    candles
}

#[test]
fn test_ema_insufficient_data() {
    let candles = create_test_candles(10, 100.0, 0.1);
    assert!(calculate_ema(&candles, 20).is_none());
}

#[test]
fn test_ema_sufficient_data() {
    let candles = create_test_candles(50, 100.0, 0.1);
    let result = calculate_ema(&candles, 12);
    assert!(result.is_some());
    let ema = result.unwrap();
    assert_eq!(ema.period, 12);
    assert!(ema.value.is_finite());
}

#[test]
fn test_calculate_multiple_emas() {
    let candles = create_test_candles(250, 100.0, 0.1);
    let periods = vec![9, 21, 50, 200];
    let emas = calculate_emas(&candles, &periods);
    assert_eq!(emas.len(), 4);
}

#[test]
fn test_calculate_emas_skips_long_periods() {
    let candles = create_test_candles(100, 100.0, 0.1);
    let emas = calculate_emas(&candles, &[9, 21, 200]);
    assert_eq!(emas.len(), 2);
}

#[test]
fn test_ema_cross_direction() {
    let up = create_test_candles(50, 100.0, 0.1);
    assert_eq!(check_ema_cross(&up, 12, 26), Some(1));

    let down = create_test_candles(50, 100.0, -0.1);
    assert_eq!(check_ema_cross(&down, 12, 26), Some(-1));
}

#[test]
fn test_stacked_uptrend() {
    let up = create_test_candles(120, 100.0, 0.1);
    assert!(is_stacked_uptrend(&up, 20, 50));

    let down = create_test_candles(120, 100.0, -0.1);
    assert!(!is_stacked_uptrend(&down, 20, 50));
}
