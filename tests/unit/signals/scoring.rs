//! Unit tests for composite score and confidence bands

use fxsignal::config::ScorerConfig;
use fxsignal::models::ConfidenceBand;
use fxsignal::signals::{clamp01, composite_score, confidence_band};

#[test]
fn test_clamp01() {
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(0.4), 0.4);
    assert_eq!(clamp01(1.5), 1.0);
    assert_eq!(clamp01(f64::NAN), 0.0);
}

#[test]
fn test_empty_sections_contribute_nothing() {
    let config = ScorerConfig::default();
    assert_eq!(composite_score(0, 0, 0, 0, &config), 0.0);
    assert!((composite_score(0, 0, 6, 6, &config) - 0.3).abs() < 1e-9);
    assert!((composite_score(16, 16, 0, 0, &config) - 0.7).abs() < 1e-9);
}

#[test]
fn test_composite_clamped_with_oversized_weights() {
    let config = ScorerConfig {
        technical_weight: 1.0,
        fundamental_weight: 1.0,
        ..ScorerConfig::default()
    };
    assert_eq!(composite_score(16, 16, 6, 6, &config), 1.0);
}

#[test]
fn test_band_boundaries_inclusive() {
    let config = ScorerConfig::default();
    assert_eq!(confidence_band(1.0, &config), ConfidenceBand::High);
    assert_eq!(confidence_band(0.70, &config), ConfidenceBand::High);
    assert_eq!(confidence_band(0.6999, &config), ConfidenceBand::Medium);
    assert_eq!(confidence_band(0.50, &config), ConfidenceBand::Medium);
    assert_eq!(confidence_band(0.4999, &config), ConfidenceBand::Low);
    assert_eq!(confidence_band(0.30, &config), ConfidenceBand::Low);
    assert_eq!(confidence_band(0.2999, &config), ConfidenceBand::Weak);
    assert_eq!(confidence_band(0.0, &config), ConfidenceBand::Weak);
}

#[test]
fn test_bands_are_ordered() {
    assert!(ConfidenceBand::High > ConfidenceBand::Medium);
    assert!(ConfidenceBand::Medium > ConfidenceBand::Low);
    assert!(ConfidenceBand::Low > ConfidenceBand::Weak);
}
