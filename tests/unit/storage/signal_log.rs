//! Unit tests for the signal log

use chrono::{Duration, TimeZone, Utc};
use fxsignal::models::{Action, ScoreResult};
use fxsignal::storage::{JsonlSignalLog, MemorySignalLog, SignalLog, SignalRecord};
use tempfile::tempdir;
use tokio::fs;
use tokio_test::assert_ok;

fn record(symbol: &str, minutes: i64) -> SignalRecord {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
    SignalRecord::from_result(
        symbol,
        "H1",
        &ScoreResult::unavailable("no candles"),
        Some(1.0845),
        ts,
    )
}

#[test]
fn test_record_from_result() {
    let r = record("EURUSD", 0);
    assert_eq!(r.action, Action::Wait);
    assert_eq!(r.vetoes, vec!["no candles"]);
    assert_eq!(r.price, Some(1.0845));
}

#[tokio::test]
async fn test_jsonl_round_trip_keeps_order() {
    let dir = tempdir().unwrap();
    let log = JsonlSignalLog::new(dir.path().join("nested").join("signals.jsonl"));

    for (i, symbol) in ["EURUSD", "XAUUSD", "GBPUSD"].iter().enumerate() {
        assert_ok!(log.record(&record(symbol, i as i64)).await);
    }

    let all = assert_ok!(log.recent(10).await);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], record("EURUSD", 0));

    let last_two = log.recent(2).await.unwrap();
    let symbols: Vec<&str> = last_two.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["XAUUSD", "GBPUSD"]);

    let contents = fs::read_to_string(log.path()).await.unwrap();
    assert_eq!(contents.lines().count(), 3);
}

#[tokio::test]
async fn test_jsonl_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let log = JsonlSignalLog::new(dir.path().join("absent.jsonl"));
    assert!(log.recent(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_jsonl_skips_corrupt_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("signals.jsonl");
    let log = JsonlSignalLog::new(&path);

    log.record(&record("EURUSD", 0)).await.unwrap();
    let mut contents = fs::read_to_string(&path).await.unwrap();
    contents.push_str("{truncated\n");
    fs::write(&path, contents).await.unwrap();
    log.record(&record("XAUUSD", 1)).await.unwrap();

    let records = log.recent(10).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].symbol, "XAUUSD");
}

#[tokio::test]
async fn test_memory_log() {
    let log = MemorySignalLog::new();
    assert!(log.is_empty().await);

    assert_ok!(log.record(&record("EURUSD", 0)).await);
    assert_ok!(log.record(&record("XAUUSD", 1)).await);

    assert_eq!(log.len().await, 2);
    let recent = log.recent(1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].symbol, "XAUUSD");
}
