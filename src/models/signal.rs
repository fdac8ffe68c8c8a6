use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Wait,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Wait => "WAIT",
        }
    }

    pub fn is_directional(&self) -> bool {
        !matches!(self, Action::Wait)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discretized composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceBand {
    Weak,
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::Weak => "WEAK",
            ConfidenceBand::Low => "LOW",
            ConfidenceBand::Medium => "MEDIUM",
            ConfidenceBand::High => "HIGH",
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one scorer evaluation. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub action: Action,
    pub technical_score: usize,
    pub technical_total: usize,
    pub fundamental_score: usize,
    pub fundamental_total: usize,
    pub composite_score01: f64,
    pub confidence_band: ConfidenceBand,
    pub bull_votes: usize,
    pub bear_votes: usize,
    pub reasons: Vec<String>,
    pub vetoes: Vec<String>,
}

impl ScoreResult {
    /// WAIT result used when upstream data is missing. The reason is reported as a veto.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            action: Action::Wait,
            technical_score: 0,
            technical_total: 0,
            fundamental_score: 0,
            fundamental_total: 0,
            composite_score01: 0.0,
            confidence_band: ConfidenceBand::Weak,
            bull_votes: 0,
            bear_votes: 0,
            reasons: Vec::new(),
            vetoes: vec![reason.into()],
        }
    }

    pub fn is_vetoed(&self) -> bool {
        !self.vetoes.is_empty()
    }
}

/// Price and provenance details shown next to a result. Never read by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceContext {
    pub symbol: String,
    pub timeframe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub built_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_pips: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub support: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resistance: Vec<f64>,
}

impl PriceContext {
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            price: None,
            source: None,
            built_at: Utc::now(),
            spread_pips: None,
            support: Vec::new(),
            resistance: Vec::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_built_at(mut self, built_at: DateTime<Utc>) -> Self {
        self.built_at = built_at;
        self
    }

    pub fn with_spread(mut self, spread_pips: f64) -> Self {
        self.spread_pips = Some(spread_pips);
        self
    }

    pub fn with_levels(mut self, support: Vec<f64>, resistance: Vec<f64>) -> Self {
        self.support = support;
        self.resistance = resistance;
        self
    }
}
