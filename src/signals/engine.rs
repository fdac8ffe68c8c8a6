//! Signal scorer: the veto-scored decision rule.

use serde_json::Value;
use tracing::debug;

use crate::config::ScorerConfig;
use crate::error::ScoreError;
use crate::models::{FlagBundle, ScoreResult};

use super::aggregation::VoteTally;
use super::classification::DirectionalClassification;
use super::decision::{apply_weak_downgrade, decide};
use super::scoring::{composite_score, confidence_band};
use super::vetoes::VetoRules;

/// Pure function over a flag bundle, parameterized by its direction table,
/// veto rules and thresholds. Holds no mutable state; share it freely.
#[derive(Debug, Clone)]
pub struct SignalScorer {
    classification: DirectionalClassification,
    vetoes: VetoRules,
    config: ScorerConfig,
}

impl Default for SignalScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalScorer {
    /// Standard classification, standard veto rules, default thresholds.
    pub fn new() -> Self {
        Self::with_config(
            DirectionalClassification::standard(),
            VetoRules::standard(),
            ScorerConfig::default(),
        )
    }

    pub fn with_config(
        classification: DirectionalClassification,
        vetoes: VetoRules,
        config: ScorerConfig,
    ) -> Self {
        Self {
            classification,
            vetoes,
            config,
        }
    }

    pub fn with_rules(classification: DirectionalClassification, vetoes: VetoRules) -> Self {
        Self::with_config(classification, vetoes, ScorerConfig::default())
    }

    pub fn classification(&self) -> &DirectionalClassification {
        &self.classification
    }

    pub fn veto_rules(&self) -> &VetoRules {
        &self.vetoes
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn score(&self, bundle: &FlagBundle) -> ScoreResult {
        let tally = VoteTally::count(&bundle.technical, &self.classification);

        let technical_score = bundle.technical.count_true();
        let technical_total = bundle.technical.len();
        let fundamental_score = bundle.fundamental.count_true();
        let fundamental_total = bundle.fundamental.len();

        let composite_score01 = composite_score(
            technical_score,
            technical_total,
            fundamental_score,
            fundamental_total,
            &self.config,
        );
        let band = confidence_band(composite_score01, &self.config);

        let vetoes = self.vetoes.evaluate(&bundle.fundamental);
        let action = decide(&tally, !vetoes.is_empty(), self.config.min_votes);
        let action = apply_weak_downgrade(action, composite_score01, self.config.weak_threshold);

        let reasons: Vec<String> = bundle
            .technical
            .true_names()
            .chain(
                bundle
                    .fundamental
                    .true_names()
                    .filter(|name| !self.vetoes.is_veto_flag(name)),
            )
            .map(str::to_string)
            .collect();

        debug!(
            action = %action,
            bull_votes = tally.bull,
            bear_votes = tally.bear,
            composite = composite_score01,
            vetoes = vetoes.len(),
            "Scored flag bundle"
        );

        ScoreResult {
            action,
            technical_score,
            technical_total,
            fundamental_score,
            fundamental_total,
            composite_score01,
            confidence_band: band,
            bull_votes: tally.bull,
            bear_votes: tally.bear,
            reasons,
            vetoes,
        }
    }

    /// Score an untyped `{"technical": {..}, "fundamental": {..}}` object.
    pub fn score_json(&self, value: &Value) -> Result<ScoreResult, ScoreError> {
        let bundle = FlagBundle::from_json(value)?;
        Ok(self.score(&bundle))
    }
}
