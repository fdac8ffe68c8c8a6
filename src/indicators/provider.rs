//! Candles in, technical flags out.

use tracing::debug;

use crate::models::flags::technical;
use crate::models::{Candle, FlagSet, IndicatorSnapshot, Timeframe};

use super::momentum::{calculate_macd, calculate_rsi, macd_series, rsi_series};
use super::patterns::{bearish_engulfing, bullish_engulfing, momentum_body, DEFAULT_BIG_BODY_RATIO};
use super::structure::{
    calculate_support_resistance, fibonacci_touch, rsi_bearish_divergence, rsi_bullish_divergence,
    support_resistance_break, DEFAULT_FIB_ATR_TOLERANCE, DEFAULT_FIB_LOOKBACK,
    DEFAULT_LEVELS_COUNT, DEFAULT_LEVELS_LOOKBACK, DEFAULT_PIVOT_LEFT, DEFAULT_PIVOT_RIGHT,
};
use super::timeframe::higher_timeframe_confluence;
use super::trend::{calculate_adx, calculate_emas};
use super::volatility::calculate_atr;
use super::volume::{
    calculate_volume, is_high_volume, DEFAULT_VOLUME_MULTIPLIER, DEFAULT_VOLUME_PERIOD,
};

/// Technical flags plus the readings they were derived from.
#[derive(Debug, Clone)]
pub struct IndicatorReport {
    pub technical: FlagSet,
    pub snapshot: IndicatorSnapshot,
}

pub trait IndicatorProvider: Send + Sync {
    /// `None` when the series is too short to say anything.
    fn compute(&self, candles: &[Candle], timeframe: Timeframe) -> Option<IndicatorReport>;
}

/// Periods and thresholds used by [`CandleIndicatorProvider`].
#[derive(Debug, Clone)]
pub struct IndicatorSettings {
    pub ema_fast: u32,
    pub ema_slow: u32,
    pub ema_long: u32,
    pub rsi_period: u32,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub macd: (u32, u32, u32),
    pub adx_period: u32,
    pub adx_strong: f64,
    pub atr_period: u32,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            ema_fast: 9,
            ema_slow: 21,
            ema_long: 200,
            rsi_period: 14,
            rsi_overbought: 60.0,
            rsi_oversold: 40.0,
            macd: (12, 26, 9),
            adx_period: 14,
            adx_strong: 20.0,
            atr_period: 14,
        }
    }
}

/// Computes the sixteen conventional technical flags from a candle series.
///
/// An indicator that cannot be computed for lack of data leaves its flag false.
#[derive(Debug, Clone, Default)]
pub struct CandleIndicatorProvider {
    settings: IndicatorSettings,
}

impl CandleIndicatorProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IndicatorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }
}

impl IndicatorProvider for CandleIndicatorProvider {
    fn compute(&self, candles: &[Candle], timeframe: Timeframe) -> Option<IndicatorReport> {
        if candles.len() < 2 {
            return None;
        }
        let s = &self.settings;
        let last = candles.last()?;

        let emas = calculate_emas(candles, &[s.ema_fast, s.ema_slow, s.ema_long]);
        let find_ema = |period: u32| emas.iter().find(|e| e.period == period).map(|e| e.value);
        let ema_fast_gt_slow = match (find_ema(s.ema_fast), find_ema(s.ema_slow)) {
            (Some(fast), Some(slow)) => fast > slow,
            _ => false,
        };
        let above_long_ema = find_ema(s.ema_long).is_some_and(|long| last.close > long);

        let rsi = calculate_rsi(candles, s.rsi_period);
        let rsi_values = rsi_series(candles, s.rsi_period);
        let rsi_overbought = rsi.as_ref().is_some_and(|r| r.value > s.rsi_overbought);
        let rsi_oversold = rsi.as_ref().is_some_and(|r| r.value < s.rsi_oversold);

        let (fast, slow, signal) = s.macd;
        let macd = calculate_macd(candles, fast, slow, signal);
        let crosses = macd_series(candles, fast, slow, signal);
        let macd_ready = macd.is_some();

        let adx = calculate_adx(candles, s.adx_period);
        let adx_strong = adx.as_ref().is_some_and(|a| a.value > s.adx_strong);

        let atr = calculate_atr(candles, s.atr_period);
        let fib_touch = atr.as_ref().is_some_and(|a| {
            fibonacci_touch(candles, DEFAULT_FIB_LOOKBACK, a.value, DEFAULT_FIB_ATR_TOLERANCE)
        });

        let volume = calculate_volume(candles, DEFAULT_VOLUME_PERIOD);
        let high_volume = volume
            .as_ref()
            .is_some_and(|v| is_high_volume(v, DEFAULT_VOLUME_MULTIPLIER));

        let levels =
            calculate_support_resistance(candles, DEFAULT_LEVELS_LOOKBACK, DEFAULT_LEVELS_COUNT);

        let technical = FlagSet::new()
            .with(technical::EMA_FAST_GT_SLOW, ema_fast_gt_slow)
            .with(technical::RSI_OVERBOUGHT, rsi_overbought)
            .with(technical::RSI_OVERSOLD, rsi_oversold)
            .with(technical::MACD_CROSS_UP, macd_ready && crosses.crossed_up())
            .with(technical::MACD_CROSS_DOWN, macd_ready && crosses.crossed_down())
            .with(technical::ADX_STRONG, adx_strong)
            .with(technical::BULLISH_ENGULFING, bullish_engulfing(candles))
            .with(technical::BEARISH_ENGULFING, bearish_engulfing(candles))
            .with(technical::ABOVE_LONG_EMA, above_long_ema)
            .with(
                technical::HIGHER_TIMEFRAME_CONFLUENCE,
                higher_timeframe_confluence(candles, timeframe),
            )
            .with(
                technical::SUPPORT_RESISTANCE_BREAK,
                support_resistance_break(candles, DEFAULT_PIVOT_LEFT, DEFAULT_PIVOT_RIGHT),
            )
            .with(technical::HIGH_VOLUME, high_volume)
            .with(
                technical::MOMENTUM_BODY,
                momentum_body(candles, DEFAULT_BIG_BODY_RATIO),
            )
            .with(technical::FIBONACCI_TOUCH, fib_touch)
            .with(
                technical::RSI_BULLISH_DIVERGENCE,
                rsi_bullish_divergence(candles, &rsi_values, DEFAULT_PIVOT_LEFT, DEFAULT_PIVOT_RIGHT),
            )
            .with(
                technical::RSI_BEARISH_DIVERGENCE,
                rsi_bearish_divergence(candles, &rsi_values, DEFAULT_PIVOT_LEFT, DEFAULT_PIVOT_RIGHT),
            );

        debug!(
            candles = candles.len(),
            timeframe = %timeframe,
            true_flags = technical.count_true(),
            "Computed technical flags"
        );

        let mut snapshot = IndicatorSnapshot::new(last.close, last.timestamp)
            .with_emas(emas)
            .with_levels(levels)
            .with_timeframe(timeframe.label());
        if let Some(rsi) = rsi {
            snapshot = snapshot.with_rsi(rsi);
        }
        if let Some(macd) = macd {
            snapshot = snapshot.with_macd(macd);
        }
        if let Some(adx) = adx {
            snapshot = snapshot.with_adx(adx);
        }
        if let Some(atr) = atr {
            snapshot = snapshot.with_atr(atr);
        }
        if let Some(volume) = volume {
            snapshot = snapshot.with_volume(volume);
        }

        Some(IndicatorReport {
            technical,
            snapshot,
        })
    }
}
