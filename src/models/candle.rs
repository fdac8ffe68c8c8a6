use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle, oldest-first in every series handed around the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Candle timeframe expressed in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeframe(u32);

impl Timeframe {
    pub const M1: Timeframe = Timeframe(1);
    pub const M5: Timeframe = Timeframe(5);
    pub const M15: Timeframe = Timeframe(15);
    pub const M30: Timeframe = Timeframe(30);
    pub const H1: Timeframe = Timeframe(60);
    pub const H4: Timeframe = Timeframe(240);
    pub const D1: Timeframe = Timeframe(1440);

    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes.max(1))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn seconds(&self) -> i64 {
        self.0 as i64 * 60
    }

    /// Interval string understood by the TwelveData time_series endpoint.
    pub fn twelvedata_interval(&self) -> String {
        match self.0 {
            1 => "1min".to_string(),
            5 => "5min".to_string(),
            15 => "15min".to_string(),
            30 => "30min".to_string(),
            45 => "45min".to_string(),
            60 => "1h".to_string(),
            120 => "2h".to_string(),
            240 => "4h".to_string(),
            480 => "8h".to_string(),
            1440 => "1day".to_string(),
            10080 => "1week".to_string(),
            43200 => "1month".to_string(),
            other => format!("{}min", other),
        }
    }

    /// AlphaVantage intraday only supports a fixed set of intervals.
    pub fn alphavantage_interval(&self) -> Option<&'static str> {
        match self.0 {
            1 => Some("1min"),
            5 => Some("5min"),
            15 => Some("15min"),
            30 => Some("30min"),
            60 => Some("60min"),
            _ => None,
        }
    }

    /// Short label used in chat messages (M5, H1, H4, D1).
    pub fn label(&self) -> String {
        if self.0 < 60 {
            format!("M{}", self.0)
        } else if self.0 < 1440 {
            format!("H{}", self.0 / 60)
        } else {
            format!("D{}", self.0 / 1440)
        }
    }

    /// Timeframe used for higher-timeframe confluence, if one is defined.
    pub fn higher(&self) -> Option<Timeframe> {
        match self.0 {
            5 => Some(Timeframe::H1),
            60 => Some(Timeframe::H4),
            240 => Some(Timeframe::D1),
            _ => None,
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::H1
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.0)
    }
}
