//! Fundamental flags: calendar, spread, candle timing and news.
//!
//! Every provider fails closed. When a flag cannot be established it is false,
//! which trips the matching veto rule and keeps the scorer on WAIT.

pub mod calendar;
pub mod context;
pub mod news;
pub mod sentiment;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::flags::fundamental;
use crate::models::{FlagSet, Timeframe};

pub use calendar::{
    country_currency, impact_of, pair_currencies, EconomicEvent, FinnhubCalendarClient, Impact,
};
pub use context::ContextFundamentals;
pub use news::{symbol_to_query, NewsApiClient};
pub use sentiment::{score_headlines, score_text, SentimentLabel, SentimentSummary};

/// What a provider knows about the moment of evaluation.
#[derive(Debug, Clone)]
pub struct FundamentalContext {
    pub timeframe: Timeframe,
    pub now: DateTime<Utc>,
    pub spread_pips: Option<f64>,
}

impl FundamentalContext {
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            now: Utc::now(),
            spread_pips: None,
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_spread(mut self, spread_pips: Option<f64>) -> Self {
        self.spread_pips = spread_pips;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FundamentalReport {
    pub flags: FlagSet,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentSummary>,
}

impl FundamentalReport {
    pub fn new(flags: FlagSet) -> Self {
        Self {
            flags,
            notes: Vec::new(),
            sentiment: None,
        }
    }
}

#[async_trait]
pub trait FundamentalProvider: Send + Sync {
    async fn evaluate(&self, symbol: &str, ctx: &FundamentalContext) -> FundamentalReport;
}

/// All six conventional flags set to false.
pub fn all_false() -> FlagSet {
    fundamental::ALL.iter().map(|name| (*name, false)).collect()
}

/// No data at all: every veto trips.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativeFundamentals;

#[async_trait]
impl FundamentalProvider for ConservativeFundamentals {
    async fn evaluate(&self, _symbol: &str, _ctx: &FundamentalContext) -> FundamentalReport {
        let mut report = FundamentalReport::new(all_false());
        report.notes.push("no fundamental data source".to_string());
        report
    }
}

/// Returns the same flags for every symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticFundamentals {
    flags: FlagSet,
}

impl StaticFundamentals {
    pub fn new(flags: FlagSet) -> Self {
        Self { flags }
    }

    /// Every conventional flag true.
    pub fn permissive() -> Self {
        Self::new(fundamental::ALL.iter().map(|name| (*name, true)).collect())
    }
}

#[async_trait]
impl FundamentalProvider for StaticFundamentals {
    async fn evaluate(&self, _symbol: &str, _ctx: &FundamentalContext) -> FundamentalReport {
        FundamentalReport::new(self.flags.clone())
    }
}
