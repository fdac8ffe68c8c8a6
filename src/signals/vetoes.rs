//! Veto rules: fundamental flags that must be true before any directional action.

use serde::{Deserialize, Serialize};

use crate::models::flags::fundamental;
use crate::models::FlagSet;

pub const REASON_RED_NEWS: &str = "red news < 1h";
pub const REASON_SPREAD: &str = "spread too high";
pub const REASON_MID_CANDLE: &str = "mid-candle window";
pub const REASON_STALE_DATA: &str = "stale data";
pub const REASON_PRICE_MISMATCH: &str = "cross-source price mismatch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetoRule {
    pub flag: String,
    pub reason: String,
}

impl VetoRule {
    pub fn new(flag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            reason: reason.into(),
        }
    }

    /// A false or missing flag triggers the rule.
    pub fn is_triggered(&self, flags: &FlagSet) -> bool {
        !flags.get(&self.flag)
    }
}

/// Ordered list of veto rules; reasons are reported in this order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VetoRules {
    rules: Vec<VetoRule>,
}

impl VetoRules {
    pub fn new(rules: Vec<VetoRule>) -> Self {
        Self { rules }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Red news, spread and mid-candle guards.
    pub fn standard() -> Self {
        Self::new(vec![
            VetoRule::new(fundamental::NO_RED_NEWS_WITHIN_1H, REASON_RED_NEWS),
            VetoRule::new(fundamental::SPREAD_ACCEPTABLE, REASON_SPREAD),
            VetoRule::new(fundamental::NOT_MID_CANDLE, REASON_MID_CANDLE),
        ])
    }

    pub fn with(mut self, rule: VetoRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Reasons of every triggered rule, in declaration order.
    pub fn evaluate(&self, flags: &FlagSet) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.is_triggered(flags))
            .map(|rule| rule.reason.clone())
            .collect()
    }

    pub fn is_veto_flag(&self, flag: &str) -> bool {
        self.rules.iter().any(|rule| rule.flag == flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VetoRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
