//! Unit tests for flag sets and bundles

use fxsignal::error::ScoreError;
use fxsignal::models::{FlagBundle, FlagSet};
use serde_json::json;

#[test]
fn test_unknown_flag_reads_false() {
    let flags = FlagSet::new().with("a", true);
    assert!(flags.get("a"));
    assert!(!flags.get("missing"));
    assert!(!flags.contains("missing"));
}

#[test]
fn test_set_keeps_declaration_order() {
    let mut flags = FlagSet::new().with("b", false).with("a", true).with("c", true);
    flags.set("b", true);

    let names: Vec<&str> = flags.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
    assert_eq!(flags.len(), 3);
    assert_eq!(flags.count_true(), 3);
}

#[test]
fn test_true_names_in_order() {
    let flags: FlagSet = vec![("x", true), ("y", false), ("z", true)].into_iter().collect();
    assert_eq!(flags.true_names().collect::<Vec<_>>(), vec!["x", "z"]);
}

#[test]
fn test_serialize_preserves_order() {
    let flags = FlagSet::new().with("zeta", true).with("alpha", false);
    let text = serde_json::to_string(&flags).unwrap();
    assert_eq!(text, r#"{"zeta":true,"alpha":false}"#);

    let back: FlagSet = serde_json::from_str(&text).unwrap();
    assert_eq!(back, flags);
}

#[test]
fn test_bundle_from_json() {
    let bundle = FlagBundle::from_json(&json!({
        "technical": {"ema_fast_gt_slow": true, "rsi_oversold": false},
        "fundamental": {"spread_acceptable": true}
    }))
    .unwrap();

    assert!(bundle.technical_flag("ema_fast_gt_slow"));
    assert!(!bundle.technical_flag("rsi_oversold"));
    assert!(bundle.fundamental_flag("spread_acceptable"));
    assert!(!bundle.fundamental_flag("no_red_news_within_1h"));
    assert_eq!(bundle.technical.len(), 2);
}

#[test]
fn test_bundle_missing_sections_are_empty() {
    let bundle = FlagBundle::from_json(&json!({})).unwrap();
    assert!(bundle.technical.is_empty());
    assert!(bundle.fundamental.is_empty());
}

#[test]
fn test_non_boolean_flag_rejected() {
    let err = FlagBundle::from_json(&json!({
        "technical": {"adx_strong": 1}
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ScoreError::InvalidInput {
            key: "technical.adx_strong".to_string()
        }
    );
}

#[test]
fn test_non_object_section_rejected() {
    let err = FlagBundle::from_json(&json!({"fundamental": [true]})).unwrap_err();
    assert_eq!(
        err,
        ScoreError::InvalidInput {
            key: "fundamental".to_string()
        }
    );
}

#[test]
fn test_non_object_root_rejected() {
    for value in [json!([true]), json!("technical"), json!(1), json!(null)] {
        assert_eq!(
            FlagBundle::from_json(&value).unwrap_err(),
            ScoreError::InvalidInput {
                key: "<root>".to_string()
            }
        );
    }
}

#[test]
fn test_deserialize_names_offending_flag() {
    let err = serde_json::from_str::<FlagSet>(r#"{"ema_fast_gt_slow": true, "adx_strong": "yes"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("`adx_strong`"), "{}", err);

    let err = serde_json::from_str::<FlagBundle>(r#"{"technical": {"adx_strong": 1}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("`technical.adx_strong`"), "{}", err);

    let err = serde_json::from_str::<FlagBundle>("[1, 2]").unwrap_err();
    assert!(err.to_string().contains("`<root>`"), "{}", err);
}

#[test]
fn test_deserialize_bundle_keeps_order() {
    let bundle: FlagBundle = serde_json::from_str(
        r#"{"technical": {"zeta": true, "alpha": false}, "fundamental": {"spread_acceptable": true}}"#,
    )
    .unwrap();
    let names: Vec<&str> = bundle.technical.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
    assert!(bundle.fundamental_flag("spread_acceptable"));
}
