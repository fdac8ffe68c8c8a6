//! Direction tags for technical flags.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::flags::technical;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DirectionTag {
    Bullish,
    Bearish,
    Neutral,
}

/// Flag name to direction. Flags missing from the table are treated as neutral.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectionalClassification {
    tags: HashMap<String, DirectionTag>,
}

impl DirectionalClassification {
    /// Empty table: every flag is neutral.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional table for the sixteen technical flags.
    ///
    /// RSI bands are read as momentum: above 60 votes bullish, below 40 bearish.
    pub fn standard() -> Self {
        Self::new()
            .with(technical::EMA_FAST_GT_SLOW, DirectionTag::Bullish)
            .with(technical::RSI_OVERBOUGHT, DirectionTag::Bullish)
            .with(technical::RSI_OVERSOLD, DirectionTag::Bearish)
            .with(technical::MACD_CROSS_UP, DirectionTag::Bullish)
            .with(technical::MACD_CROSS_DOWN, DirectionTag::Bearish)
            .with(technical::ADX_STRONG, DirectionTag::Neutral)
            .with(technical::BULLISH_ENGULFING, DirectionTag::Bullish)
            .with(technical::BEARISH_ENGULFING, DirectionTag::Bearish)
            .with(technical::ABOVE_LONG_EMA, DirectionTag::Bullish)
            .with(technical::HIGHER_TIMEFRAME_CONFLUENCE, DirectionTag::Bullish)
            .with(technical::SUPPORT_RESISTANCE_BREAK, DirectionTag::Neutral)
            .with(technical::HIGH_VOLUME, DirectionTag::Neutral)
            .with(technical::MOMENTUM_BODY, DirectionTag::Neutral)
            .with(technical::FIBONACCI_TOUCH, DirectionTag::Neutral)
            .with(technical::RSI_BULLISH_DIVERGENCE, DirectionTag::Bullish)
            .with(technical::RSI_BEARISH_DIVERGENCE, DirectionTag::Bearish)
    }

    pub fn with(mut self, flag: impl Into<String>, tag: DirectionTag) -> Self {
        self.insert(flag, tag);
        self
    }

    pub fn insert(&mut self, flag: impl Into<String>, tag: DirectionTag) {
        self.tags.insert(flag.into(), tag);
    }

    /// `None` when the flag has no entry.
    pub fn get(&self, flag: &str) -> Option<DirectionTag> {
        self.tags.get(flag).copied()
    }

    pub fn tag(&self, flag: &str) -> DirectionTag {
        self.get(flag).unwrap_or(DirectionTag::Neutral)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
