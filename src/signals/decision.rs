//! Action selection and risk labels.

use crate::models::Action;

use super::aggregation::VoteTally;
use super::vetoes::{
    REASON_MID_CANDLE, REASON_PRICE_MISMATCH, REASON_RED_NEWS, REASON_SPREAD, REASON_STALE_DATA,
};

/// Rule order: vetoes, conflict, unanimous bull, unanimous bear, else WAIT.
pub fn decide(tally: &VoteTally, vetoed: bool, min_votes: usize) -> Action {
    if vetoed || tally.is_conflicted() {
        Action::Wait
    } else if tally.bull >= min_votes && tally.bear == 0 {
        Action::Buy
    } else if tally.bear >= min_votes && tally.bull == 0 {
        Action::Sell
    } else {
        Action::Wait
    }
}

/// Any composite below the weak threshold is downgraded to WAIT.
pub fn apply_weak_downgrade(action: Action, score01: f64, weak_threshold: f64) -> Action {
    if score01 < weak_threshold {
        Action::Wait
    } else {
        action
    }
}

/// Short risk labels for known veto reasons, in veto order. Unknown reasons are skipped.
pub fn risk_notes(vetoes: &[String]) -> Vec<String> {
    vetoes
        .iter()
        .filter_map(|reason| {
            let note = match reason.as_str() {
                REASON_RED_NEWS => "calendar risk",
                REASON_SPREAD => "spread",
                REASON_MID_CANDLE => "mid-candle",
                REASON_STALE_DATA => "stale",
                REASON_PRICE_MISMATCH => "price mismatch",
                _ => return None,
            };
            Some(note.to_string())
        })
        .collect()
}
