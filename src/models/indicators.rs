use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<(u32, u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtrIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdxIndicator {
    pub value: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeIndicator {
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ma_period: Option<u32>,
}

/// Nearby price levels for display: supports ascending, resistances descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

/// Numeric indicator readings behind a set of technical flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<RsiIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<AtrIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<AdxIndicator>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub emas: Vec<EmaIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<VolumeIndicator>,
    #[serde(default)]
    pub levels: PriceLevels,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
}

impl IndicatorSnapshot {
    pub fn new(price: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            price,
            macd: None,
            rsi: None,
            atr: None,
            adx: None,
            emas: Vec::new(),
            volume: None,
            levels: PriceLevels::default(),
            timestamp,
            timeframe: None,
        }
    }

    pub fn with_macd(mut self, macd: MacdIndicator) -> Self {
        self.macd = Some(macd);
        self
    }

    pub fn with_rsi(mut self, rsi: RsiIndicator) -> Self {
        self.rsi = Some(rsi);
        self
    }

    pub fn with_atr(mut self, atr: AtrIndicator) -> Self {
        self.atr = Some(atr);
        self
    }

    pub fn with_adx(mut self, adx: AdxIndicator) -> Self {
        self.adx = Some(adx);
        self
    }

    pub fn with_emas(mut self, emas: Vec<EmaIndicator>) -> Self {
        self.emas = emas;
        self
    }

    pub fn with_volume(mut self, volume: VolumeIndicator) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_levels(mut self, levels: PriceLevels) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_timeframe(mut self, timeframe: String) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    pub fn ema(&self, period: u32) -> Option<f64> {
        self.emas.iter().find(|e| e.period == period).map(|e| e.value)
    }
}
