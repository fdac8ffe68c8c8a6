//! Composite score and confidence band.

use crate::config::ScorerConfig;
use crate::models::ConfidenceBand;

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// `count / total`, or 0 when there is nothing to count.
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Weighted blend of the technical and fundamental ratios, clamped to [0, 1].
pub fn composite_score(
    technical_score: usize,
    technical_total: usize,
    fundamental_score: usize,
    fundamental_total: usize,
    config: &ScorerConfig,
) -> f64 {
    clamp01(
        ratio(technical_score, technical_total) * config.technical_weight
            + ratio(fundamental_score, fundamental_total) * config.fundamental_weight,
    )
}

/// Top-down band lookup; lower bounds are inclusive.
pub fn confidence_band(score01: f64, config: &ScorerConfig) -> ConfidenceBand {
    if score01 >= config.high_threshold {
        ConfidenceBand::High
    } else if score01 >= config.medium_threshold {
        ConfidenceBand::Medium
    } else if score01 >= config.low_threshold {
        ConfidenceBand::Low
    } else {
        ConfidenceBand::Weak
    }
}
