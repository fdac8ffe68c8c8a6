//! Unit tests for the evaluation runtime

use std::sync::Arc;

use fxsignal::core::{Analyzer, RuntimeConfig, SignalRuntime};
use fxsignal::fundamentals::ConservativeFundamentals;
use fxsignal::indicators::CandleIndicatorProvider;
use fxsignal::models::{Action, Timeframe};
use fxsignal::services::PlaceholderMarketDataProvider;
use fxsignal::signals::SignalScorer;
use fxsignal::storage::{MemorySignalLog, SignalLog};

fn placeholder_analyzer() -> Arc<Analyzer> {
    Arc::new(Analyzer::new(
        Arc::new(PlaceholderMarketDataProvider),
        Arc::new(CandleIndicatorProvider::new()),
        Arc::new(ConservativeFundamentals),
        Arc::new(SignalScorer::new()),
    ))
}

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.evaluation_interval_seconds, 300);
    assert_eq!(config.symbols, vec!["EURUSD".to_string()]);
    assert_eq!(config.timeframe, Timeframe::H1);
}

#[tokio::test]
async fn test_evaluate_once_keeps_symbol_order() {
    let config = RuntimeConfig {
        evaluation_interval_seconds: 60,
        symbols: vec!["EURUSD".to_string(), "XAUUSD".to_string()],
        timeframe: Timeframe::H1,
    };
    let log = Arc::new(MemorySignalLog::new());
    let runtime = SignalRuntime::new(config, placeholder_analyzer()).with_log(log.clone());

    let analyses = runtime.evaluate_once().await;

    assert_eq!(analyses.len(), 2);
    assert_eq!(analyses[0].context.symbol, "EURUSD");
    assert_eq!(analyses[1].context.symbol, "XAUUSD");
    for analysis in &analyses {
        assert_eq!(analysis.result.action, Action::Wait);
        assert_eq!(analysis.result.vetoes, vec!["no candles"]);
        assert!(analysis.message.contains("*WAIT*"));
    }

    let records = log.recent(10).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].symbol, "EURUSD");
}

#[tokio::test]
async fn test_run_until_stops_on_shutdown() {
    let runtime = SignalRuntime::new(RuntimeConfig::default(), placeholder_analyzer());
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        runtime.run_until(async {}),
    )
    .await;
    assert!(result.is_ok());
}
