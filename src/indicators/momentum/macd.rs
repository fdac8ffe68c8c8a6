//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::{Candle, MacdIndicator};

/// MACD line, signal line and histogram, one value per candle.
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// Line crossed above the signal on the last candle.
    pub fn crossed_up(&self) -> bool {
        self.cross(|prev_diff, diff| prev_diff < 0.0 && diff > 0.0)
    }

    /// Line crossed below the signal on the last candle.
    pub fn crossed_down(&self) -> bool {
        self.cross(|prev_diff, diff| prev_diff > 0.0 && diff < 0.0)
    }

    fn cross(&self, test: impl Fn(f64, f64) -> bool) -> bool {
        let n = self.line.len();
        if n < 2 || self.signal.len() != n {
            return false;
        }
        let prev_diff = self.line[n - 2] - self.signal[n - 2];
        let diff = self.line[n - 1] - self.signal[n - 1];
        test(prev_diff, diff)
    }
}

/// MACD = EMA(fast) - EMA(slow), Signal = EMA(signal) of MACD
pub fn macd_series(candles: &[Candle], fast_period: u32, slow_period: u32, signal_period: u32) -> MacdSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast = math::ema_series(&closes, fast_period as usize);
    let slow = math::ema_series(&closes, slow_period as usize);

    let line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal = math::ema_series(&line, signal_period as usize);
    let histogram = line.iter().zip(signal.iter()).map(|(l, s)| l - s).collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}

/// Calculate MACD indicator
pub fn calculate_macd(candles: &[Candle], fast_period: u32, slow_period: u32, signal_period: u32) -> Option<MacdIndicator> {
    if candles.len() < slow_period as usize + signal_period as usize {
        return None;
    }

    let series = macd_series(candles, fast_period, slow_period, signal_period);
    Some(MacdIndicator {
        macd: *series.line.last()?,
        signal: *series.signal.last()?,
        histogram: *series.histogram.last()?,
        period: Some((fast_period, slow_period, signal_period)),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Option<MacdIndicator> {
    calculate_macd(candles, 12, 26, 9)
}
