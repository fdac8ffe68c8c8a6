//! Keyword-lexicon headline sentiment.

use serde::{Deserialize, Serialize};

const POSITIVE: &[&str] = &[
    "good", "gain", "gains", "beats", "beat", "up", "soar", "soars", "bull", "bullish",
    "positive", "optimistic", "upgrade", "raised", "breakout", "strong", "rally", "rallies",
];

const NEGATIVE: &[&str] = &[
    "bad", "loss", "losses", "miss", "down", "drop", "drops", "fall", "falls", "bear", "bearish",
    "negative", "pessimistic", "downgrade", "cut", "weak", "warning", "probe", "slump",
];

pub const LABEL_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub average: f64,
    pub label: SentimentLabel,
    pub scored: usize,
}

impl SentimentSummary {
    /// Anything short of negative is supportive.
    pub fn is_supportive(&self) -> bool {
        self.label != SentimentLabel::Negative
    }
}

/// `(pos - neg) / (pos + neg)` over lexicon hits, 0 when nothing matches.
pub fn score_text(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let (mut pos, mut neg) = (0usize, 0usize);
    for word in lowered
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
    {
        if POSITIVE.contains(&word) {
            pos += 1;
        } else if NEGATIVE.contains(&word) {
            neg += 1;
        }
    }
    let total = pos + neg;
    if total == 0 {
        0.0
    } else {
        (pos as f64 - neg as f64) / total as f64
    }
}

/// Average score over non-empty headlines.
pub fn score_headlines<S: AsRef<str>>(headlines: &[S]) -> SentimentSummary {
    let scores: Vec<f64> = headlines
        .iter()
        .map(AsRef::as_ref)
        .filter(|h| !h.trim().is_empty())
        .map(score_text)
        .collect();
    let average = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    SentimentSummary {
        average,
        label: SentimentLabel::from_score(average),
        scored: scores.len(),
    }
}
