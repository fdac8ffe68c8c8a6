//! Unit tests for chat message rendering

use chrono::{TimeZone, Utc};
use fxsignal::models::{Action, ConfidenceBand, PriceContext, ScoreResult};
use fxsignal::presentation::{render_signal_message, truncate_chars, MAX_MESSAGE_CHARS};

fn sample_result() -> ScoreResult {
    ScoreResult {
        action: Action::Wait,
        technical_score: 4,
        technical_total: 16,
        fundamental_score: 5,
        fundamental_total: 6,
        composite_score01: 0.425,
        confidence_band: ConfidenceBand::Low,
        bull_votes: 3,
        bear_votes: 0,
        reasons: vec!["ema_fast_gt_slow".to_string(), "macd_cross_up".to_string()],
        vetoes: vec!["spread too high".to_string()],
    }
}

#[test]
fn test_full_layout() {
    let ctx = PriceContext::new("EURUSD", "H1")
        .with_built_at(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
        .with_spread(2.5)
        .with_levels(vec![1.08, 1.075], vec![1.09, 1.095, 1.1, 1.2])
        .with_source("twelvedata");

    let message = render_signal_message(&ctx, &sample_result());

    let expected = [
        "📊 *EURUSD* (H1)",
        "🕒 Signal Time (UTC): `2024-01-01T12:00:00Z`",
        "📈 Action: *WAIT*   |   Confidence: *LOW*",
        "📊 Score: 4/16 + 5/6",
        "🧠 Reason: ema_fast_gt_slow, macd_cross_up",
        "⚠️ Risk: spread",
        "📉 Spread: 2.5 pips",
        "Support: 1.08, 1.075",
        "Resistance: 1.09, 1.095, 1.1",
        "Source: twelvedata",
    ]
    .join("\n");
    assert_eq!(message, expected);
}

#[test]
fn test_minimal_layout_defaults() {
    let ctx = PriceContext::new("XAUUSD", "H4")
        .with_built_at(Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap());
    let result = ScoreResult {
        reasons: Vec::new(),
        vetoes: Vec::new(),
        ..sample_result()
    };

    let message = render_signal_message(&ctx, &result);

    assert!(message.contains("🧠 Reason: mixed"));
    assert!(message.contains("⚠️ Risk: normal"));
    assert!(!message.contains("Spread"));
    assert!(!message.contains("Support"));
    assert!(!message.contains("Source"));
    assert_eq!(message.lines().count(), 6);
}

#[test]
fn test_unavailable_result_renders() {
    let ctx = PriceContext::new("EURUSD", "H1");
    let message = render_signal_message(&ctx, &ScoreResult::unavailable("no candles"));
    assert!(message.contains("*WAIT*"));
    assert!(message.contains("*WEAK*"));
    assert!(message.contains("⚠️ Risk: normal"));
}

#[test]
fn test_truncate_chars_respects_code_points() {
    assert_eq!(truncate_chars("héllo", 2), "hé");
    assert_eq!(truncate_chars("short", 10), "short");
}

#[test]
fn test_long_message_truncated() {
    let ctx = PriceContext::new("EURUSD", "H1");
    let result = ScoreResult {
        reasons: vec!["ä".repeat(50); 200],
        ..sample_result()
    };
    let message = render_signal_message(&ctx, &result);
    assert_eq!(message.chars().count(), MAX_MESSAGE_CHARS);
}
