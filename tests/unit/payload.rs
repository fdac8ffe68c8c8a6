//! Unit tests for payload replay

use fxsignal::error::{PayloadError, ScoreError};
use fxsignal::models::{Action, ConfidenceBand};
use fxsignal::payload::{divider, score_payload, SignalPayload};
use fxsignal::signals::SignalScorer;
use serde_json::{json, Value};

fn sample_payload() -> Value {
    json!({
        "symbol": "EURUSD",
        "timeframe": "H1",
        "price": 1.0845,
        "utc_build": "2024-01-01T12:00:00Z",
        "spread_pips": 0.8,
        "support": [1.08],
        "resistance": [1.09],
        "source": "twelvedata",
        "technical_flags": {
            "ema_fast_gt_slow": true,
            "rsi_overbought": false,
            "rsi_oversold": false,
            "macd_cross_up": true,
            "macd_cross_down": false,
            "adx_strong": false,
            "bullish_engulfing": false,
            "bearish_engulfing": false,
            "above_long_ema": true,
            "higher_timeframe_confluence": false,
            "support_resistance_break": false,
            "high_volume": false,
            "momentum_body": false,
            "fibonacci_touch": false,
            "rsi_bullish_divergence": false,
            "rsi_bearish_divergence": false
        },
        "fundamental_flags": {
            "no_red_news_within_1h": true,
            "spread_acceptable": true,
            "not_mid_candle": true,
            "news_sentiment_supportive": true,
            "no_central_bank_conflict": true,
            "external_signal_agreement": true
        }
    })
}

#[test]
fn test_score_fresh_payload() {
    let payload = SignalPayload::from_value(&sample_payload()).unwrap();
    let (result, signal) = score_payload(&SignalScorer::new(), &payload);

    assert_eq!(result.action, Action::Buy);
    assert_eq!(signal.final_action, Action::Buy);
    assert_eq!(signal.confidence_band, ConfidenceBand::Low);
    assert_eq!(signal.score_technical, 3);
    assert_eq!(signal.score_fundamental, 6);
    assert_eq!(signal.score01, 0.431);
    assert_eq!(signal.utc_build, "2024-01-01T12:00:00Z");
    assert_eq!(signal.price, Some(1.0845));
    assert!(signal.vetoes.is_empty());
    assert!(signal.risk_notes.is_empty());
}

#[test]
fn test_stale_payload_vetoed() {
    let mut value = sample_payload();
    value["ttl_ok"] = json!(false);
    let payload = SignalPayload::from_value(&value).unwrap();

    let (result, signal) = score_payload(&SignalScorer::new(), &payload);

    assert_eq!(result.action, Action::Wait);
    assert_eq!(signal.vetoes, vec!["stale data"]);
    assert_eq!(signal.risk_notes, vec!["stale"]);
    // Scores are kept; only the action changes.
    assert_eq!(signal.score01, 0.431);
}

#[test]
fn test_extra_vetoes_follow_rule_vetoes() {
    let mut value = sample_payload();
    value["fundamental_flags"]["spread_acceptable"] = json!(false);
    value["ttl_ok"] = json!(false);
    value["price_crosscheck"] = json!("mismatch");
    let payload = SignalPayload::from_value(&value).unwrap();

    let (_, signal) = score_payload(&SignalScorer::new(), &payload);

    assert_eq!(
        signal.vetoes,
        vec!["spread too high", "stale data", "cross-source price mismatch"]
    );
    assert_eq!(signal.risk_notes, vec!["spread", "stale", "price mismatch"]);
    assert_eq!(signal.final_action, Action::Wait);
}

#[test]
fn test_crosscheck_ok_is_not_a_veto() {
    let mut value = sample_payload();
    value["price_crosscheck"] = json!("ok");
    let payload = SignalPayload::from_value(&value).unwrap();
    assert!(payload.extra_vetoes().is_empty());
}

#[test]
fn test_missing_fields_reported() {
    let err = SignalPayload::from_value(&json!({"price": 1.0})).unwrap_err();
    match err {
        PayloadError::MissingFields(fields) => assert_eq!(fields, vec!["symbol", "timeframe"]),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_non_boolean_flag_rejected() {
    let mut value = sample_payload();
    value["technical_flags"]["adx_strong"] = json!("no");
    let err = SignalPayload::from_value(&value).unwrap_err();
    match err {
        PayloadError::Score(ScoreError::InvalidInput { key }) => {
            assert_eq!(key, "technical_flags.adx_strong")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_invalid_json_rejected() {
    assert!(matches!(
        SignalPayload::parse("{not json"),
        Err(PayloadError::InvalidJson(_))
    ));
}

#[test]
fn test_flag_order_survives_parsing() {
    let payload = SignalPayload::from_value(&sample_payload()).unwrap();
    let (result, _) = score_payload(&SignalScorer::new(), &payload);
    assert_eq!(
        result.reasons,
        vec![
            "ema_fast_gt_slow",
            "macd_cross_up",
            "above_long_ema",
            "news_sentiment_supportive",
            "no_central_bank_conflict",
            "external_signal_agreement",
        ]
    );
}

#[test]
fn test_divider() {
    assert_eq!(divider(), format!("\n{}\n", "-".repeat(48)));
}
