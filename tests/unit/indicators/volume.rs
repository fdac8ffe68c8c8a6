//! Unit tests for volume indicators

use chrono::Utc;
use fxsignal::indicators::volume::{calculate_volume, is_high_volume};
use fxsignal::models::Candle;

fn create_volume_candles(volumes: &[f64]) -> Vec<Candle> {
    volumes
        .iter()
        .map(|&v| Candle::new(1.0, 1.1, 0.9, 1.0, v, Utc::now()))
        .collect()
}

#[test]
fn test_volume_spike_is_high() {
    let mut volumes = vec![100.0; 19];
    volumes.push(200.0);
    let indicator = calculate_volume(&create_volume_candles(&volumes), 20).unwrap();
    assert_eq!(indicator.volume, 200.0);
    assert_eq!(indicator.volume_ma, Some(105.0));
    assert_eq!(indicator.volume_ma_period, Some(20));
    assert!(is_high_volume(&indicator, 1.1));
}

#[test]
fn test_flat_volume_is_not_high() {
    let indicator = calculate_volume(&create_volume_candles(&[100.0; 25]), 20).unwrap();
    assert!(!is_high_volume(&indicator, 1.1));
}

#[test]
fn test_zero_volume_never_high() {
    let indicator = calculate_volume(&create_volume_candles(&[0.0; 25]), 20).unwrap();
    assert!(!is_high_volume(&indicator, 1.1));
}

#[test]
fn test_short_series_has_no_average() {
    let indicator = calculate_volume(&create_volume_candles(&[100.0; 5]), 20).unwrap();
    assert!(indicator.volume_ma.is_none());
    assert!(!is_high_volume(&indicator, 1.1));
}

#[test]
fn test_empty_series() {
    assert!(calculate_volume(&[], 20).is_none());
}
