//! Volume indicators

use crate::common::math;
use crate::models::{Candle, VolumeIndicator};

pub const DEFAULT_VOLUME_PERIOD: u32 = 20;
pub const DEFAULT_VOLUME_MULTIPLIER: f64 = 1.1;

pub fn calculate_volume(candles: &[Candle], period: u32) -> Option<VolumeIndicator> {
    let last = candles.last()?;
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    let volume_ma = math::sma(&volumes, period as usize);
    Some(VolumeIndicator {
        volume: last.volume,
        volume_ma,
        volume_ma_period: volume_ma.map(|_| period),
    })
}

/// Last volume exceeds `multiplier` times its moving average.
///
/// FX feeds often report zero volume; that never counts as high.
pub fn is_high_volume(indicator: &VolumeIndicator, multiplier: f64) -> bool {
    match indicator.volume_ma {
        Some(ma) if ma > 0.0 => indicator.volume > ma * multiplier,
        _ => false,
    }
}
