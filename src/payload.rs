//! Replay of a pre-computed analysis payload through the scorer.
//!
//! Payloads carry flags computed elsewhere plus freshness metadata. Two extra
//! vetoes apply on top of the scorer's rules: stale data and a failed
//! cross-source price check.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PayloadError;
use crate::models::{Action, ConfidenceBand, FlagBundle, FlagSet, PriceContext, ScoreResult};
use crate::signals::vetoes::{REASON_PRICE_MISMATCH, REASON_STALE_DATA};
use crate::signals::{risk_notes, SignalScorer};

const REQUIRED_FIELDS: [&str; 2] = ["symbol", "timeframe"];

pub const DIVIDER_WIDTH: usize = 48;

/// Separator printed between the JSON result and the chat message.
pub fn divider() -> String {
    format!("\n{}\n", "-".repeat(DIVIDER_WIDTH))
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalPayload {
    pub symbol: String,
    pub timeframe: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub utc_build: Option<String>,
    #[serde(default)]
    pub spread_pips: Option<f64>,
    #[serde(default)]
    pub support: Vec<f64>,
    #[serde(default)]
    pub resistance: Vec<f64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub technical_flags: FlagSet,
    #[serde(default)]
    pub fundamental_flags: FlagSet,
    #[serde(default = "default_true")]
    pub ttl_ok: bool,
    #[serde(default)]
    pub price_crosscheck: Option<String>,
}

impl SignalPayload {
    /// Validate required fields and flag types before deserializing.
    pub fn from_value(value: &Value) -> Result<Self, PayloadError> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|key| value.get(**key).map_or(true, Value::is_null))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PayloadError::MissingFields(missing));
        }

        FlagSet::from_json_object(
            value.get("technical_flags").unwrap_or(&Value::Null),
            "technical_flags",
        )?;
        FlagSet::from_json_object(
            value.get("fundamental_flags").unwrap_or(&Value::Null),
            "fundamental_flags",
        )?;

        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn parse(raw: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(&value)
    }

    pub fn bundle(&self) -> FlagBundle {
        FlagBundle::new(self.technical_flags.clone(), self.fundamental_flags.clone())
    }

    /// Reasons from payload metadata, in fixed order.
    pub fn extra_vetoes(&self) -> Vec<String> {
        let mut vetoes = Vec::new();
        if !self.ttl_ok {
            vetoes.push(REASON_STALE_DATA.to_string());
        }
        if self.price_crosscheck.as_deref() == Some("mismatch") {
            vetoes.push(REASON_PRICE_MISMATCH.to_string());
        }
        vetoes
    }

    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.utc_build
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn price_context(&self) -> PriceContext {
        let mut ctx = PriceContext::new(self.symbol.clone(), self.timeframe.clone())
            .with_levels(self.support.clone(), self.resistance.clone());
        if let Some(price) = self.price {
            ctx = ctx.with_price(price);
        }
        if let Some(source) = &self.source {
            ctx = ctx.with_source(source.clone());
        }
        if let Some(spread) = self.spread_pips {
            ctx = ctx.with_spread(spread);
        }
        if let Some(built_at) = self.built_at() {
            ctx = ctx.with_built_at(built_at);
        }
        ctx
    }
}

/// Final JSON document emitted for a scored payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSignal {
    pub symbol: String,
    pub timeframe: String,
    pub utc_build: String,
    pub price: Option<f64>,
    pub final_action: Action,
    pub confidence_band: ConfidenceBand,
    pub score_technical: usize,
    pub score_fundamental: usize,
    pub score01: f64,
    pub reasons: Vec<String>,
    pub vetoes: Vec<String>,
    pub risk_notes: Vec<String>,
}

/// Score a payload, apply its extra vetoes, and return both the adjusted
/// result and the final document.
pub fn score_payload(
    scorer: &SignalScorer,
    payload: &SignalPayload,
) -> (ScoreResult, FinalSignal) {
    let base = scorer.score(&payload.bundle());
    let extra = payload.extra_vetoes();
    let result = if extra.is_empty() {
        base
    } else {
        let vetoes = base.vetoes.iter().cloned().chain(extra).collect();
        ScoreResult {
            action: Action::Wait,
            vetoes,
            ..base
        }
    };

    let ctx = payload.price_context();
    let final_signal = FinalSignal {
        symbol: payload.symbol.clone(),
        timeframe: payload.timeframe.clone(),
        utc_build: payload
            .utc_build
            .clone()
            .unwrap_or_else(|| ctx.built_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        price: payload.price,
        final_action: result.action,
        confidence_band: result.confidence_band,
        score_technical: result.technical_score,
        score_fundamental: result.fundamental_score,
        score01: round3(result.composite_score01),
        reasons: result.reasons.clone(),
        risk_notes: risk_notes(&result.vetoes),
        vetoes: result.vetoes.clone(),
    };

    (result, final_signal)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
