//! Flag bundles: the unit of input to the scorer.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ScoreError;

/// Conventional technical flag names, in the order the indicator provider emits them.
pub mod technical {
    pub const EMA_FAST_GT_SLOW: &str = "ema_fast_gt_slow";
    pub const RSI_OVERBOUGHT: &str = "rsi_overbought";
    pub const RSI_OVERSOLD: &str = "rsi_oversold";
    pub const MACD_CROSS_UP: &str = "macd_cross_up";
    pub const MACD_CROSS_DOWN: &str = "macd_cross_down";
    pub const ADX_STRONG: &str = "adx_strong";
    pub const BULLISH_ENGULFING: &str = "bullish_engulfing";
    pub const BEARISH_ENGULFING: &str = "bearish_engulfing";
    pub const ABOVE_LONG_EMA: &str = "above_long_ema";
    pub const HIGHER_TIMEFRAME_CONFLUENCE: &str = "higher_timeframe_confluence";
    pub const SUPPORT_RESISTANCE_BREAK: &str = "support_resistance_break";
    pub const HIGH_VOLUME: &str = "high_volume";
    pub const MOMENTUM_BODY: &str = "momentum_body";
    pub const FIBONACCI_TOUCH: &str = "fibonacci_touch";
    pub const RSI_BULLISH_DIVERGENCE: &str = "rsi_bullish_divergence";
    pub const RSI_BEARISH_DIVERGENCE: &str = "rsi_bearish_divergence";

    pub const ALL: [&str; 16] = [
        EMA_FAST_GT_SLOW,
        RSI_OVERBOUGHT,
        RSI_OVERSOLD,
        MACD_CROSS_UP,
        MACD_CROSS_DOWN,
        ADX_STRONG,
        BULLISH_ENGULFING,
        BEARISH_ENGULFING,
        ABOVE_LONG_EMA,
        HIGHER_TIMEFRAME_CONFLUENCE,
        SUPPORT_RESISTANCE_BREAK,
        HIGH_VOLUME,
        MOMENTUM_BODY,
        FIBONACCI_TOUCH,
        RSI_BULLISH_DIVERGENCE,
        RSI_BEARISH_DIVERGENCE,
    ];
}

/// Conventional fundamental flag names.
pub mod fundamental {
    pub const NO_RED_NEWS_WITHIN_1H: &str = "no_red_news_within_1h";
    pub const SPREAD_ACCEPTABLE: &str = "spread_acceptable";
    pub const NOT_MID_CANDLE: &str = "not_mid_candle";
    pub const NEWS_SENTIMENT_SUPPORTIVE: &str = "news_sentiment_supportive";
    pub const NO_CENTRAL_BANK_CONFLICT: &str = "no_central_bank_conflict";
    pub const EXTERNAL_SIGNAL_AGREEMENT: &str = "external_signal_agreement";

    pub const ALL: [&str; 6] = [
        NO_RED_NEWS_WITHIN_1H,
        SPREAD_ACCEPTABLE,
        NOT_MID_CANDLE,
        NEWS_SENTIMENT_SUPPORTIVE,
        NO_CENTRAL_BANK_CONFLICT,
        EXTERNAL_SIGNAL_AGREEMENT,
    ];
}

/// Named boolean flags in declaration order.
///
/// Lookups of names that were never declared return `false`, so a caller that
/// forgets a flag can only ever push the scorer towards WAIT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    entries: Vec<(String, bool)>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag. Re-declaring an existing name updates it in place and keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> bool {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or(false)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_true(&self) -> usize {
        self.entries.iter().filter(|(_, v)| *v).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Names of the flags that are true, in declaration order.
    pub fn true_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| *v)
            .map(|(n, _)| n.as_str())
    }

    /// Parse a JSON object of `name: bool`. Any other value type is rejected.
    pub fn from_json_object(value: &Value, section: &str) -> Result<Self, ScoreError> {
        let object = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::new()),
            _ => {
                return Err(ScoreError::InvalidInput {
                    key: section.to_string(),
                })
            }
        };

        let mut set = Self::new();
        for (name, raw) in object {
            let flag = raw.as_bool().ok_or_else(|| ScoreError::InvalidInput {
                key: format!("{}.{}", section, name),
            })?;
            set.set(name.clone(), flag);
        }
        Ok(set)
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for FlagSet {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

impl Serialize for FlagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct FlagSetVisitor;

impl<'de> Visitor<'de> for FlagSetVisitor {
    type Value = FlagSet;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a map of flag names to booleans")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FlagSet, A::Error> {
        let mut set = FlagSet::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            let flag = value.as_bool().ok_or_else(|| {
                <A::Error as de::Error>::custom(ScoreError::InvalidInput { key: name.clone() })
            })?;
            set.set(name, flag);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for FlagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FlagSetVisitor)
    }
}

/// Technical + fundamental flags captured for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagBundle {
    pub technical: FlagSet,
    pub fundamental: FlagSet,
}

impl<'de> Deserialize<'de> for FlagBundle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        FlagBundle::from_json(&value).map_err(de::Error::custom)
    }
}

impl FlagBundle {
    pub fn new(technical: FlagSet, fundamental: FlagSet) -> Self {
        Self {
            technical,
            fundamental,
        }
    }

    /// `false` for any name the bundle does not carry.
    pub fn technical_flag(&self, name: &str) -> bool {
        self.technical.get(name)
    }

    /// `false` for any name the bundle does not carry.
    pub fn fundamental_flag(&self, name: &str) -> bool {
        self.fundamental.get(name)
    }

    /// Build a bundle from `{"technical": {..}, "fundamental": {..}}`. Missing sections are empty.
    pub fn from_json(value: &Value) -> Result<Self, ScoreError> {
        if !value.is_object() {
            return Err(ScoreError::InvalidInput {
                key: "<root>".to_string(),
            });
        }
        let technical = FlagSet::from_json_object(
            value.get("technical").unwrap_or(&Value::Null),
            "technical",
        )?;
        let fundamental = FlagSet::from_json_object(
            value.get("fundamental").unwrap_or(&Value::Null),
            "fundamental",
        )?;
        Ok(Self::new(technical, fundamental))
    }
}
