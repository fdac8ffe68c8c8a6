//! Integration tests for the analysis pipeline with injected providers

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use fxsignal::core::{Analyzer, RuntimeConfig, SignalRuntime};
use fxsignal::error::MarketDataError;
use fxsignal::fundamentals::{ConservativeFundamentals, FundamentalProvider, StaticFundamentals};
use fxsignal::indicators::CandleIndicatorProvider;
use fxsignal::metrics::Metrics;
use fxsignal::models::{Action, Candle, Timeframe};
use fxsignal::services::MarketDataProvider;
use fxsignal::signals::SignalScorer;
use fxsignal::storage::{JsonlSignalLog, SignalLog};
use tempfile::tempdir;

/// Steady hourly uptrend of `count` bullish candles.
fn uptrend(count: usize) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let close = 1.1000 + i as f64 * 0.0005;
            Candle::new(
                close - 0.0002,
                close + 0.0003,
                close - 0.0003,
                close,
                1000.0,
                start + Duration::hours(i as i64),
            )
        })
        .collect()
}

struct StubMarketData {
    candles: Vec<Candle>,
}

#[async_trait]
impl MarketDataProvider for StubMarketData {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn get_candles(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let skip = self.candles.len().saturating_sub(limit);
        Ok(self.candles[skip..].to_vec())
    }
}

struct BrokenMarketData;

#[async_trait]
impl MarketDataProvider for BrokenMarketData {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn get_candles(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        Err(MarketDataError::Api {
            provider: "broken",
            message: "upstream down".to_string(),
        })
    }
}

fn analyzer_with(
    market_data: Arc<dyn MarketDataProvider>,
    permissive: bool,
) -> Analyzer {
    let fundamentals: Arc<dyn FundamentalProvider> = if permissive {
        Arc::new(StaticFundamentals::permissive())
    } else {
        Arc::new(ConservativeFundamentals)
    };
    Analyzer::new(
        market_data,
        Arc::new(CandleIndicatorProvider::new()),
        fundamentals,
        Arc::new(SignalScorer::new()),
    )
}

#[tokio::test]
async fn uptrend_with_clear_fundamentals_buys() {
    let candles = uptrend(300);
    let last_close = candles.last().unwrap().close;
    let analyzer = analyzer_with(Arc::new(StubMarketData { candles }), true).with_spread(Some(0.8));

    let analysis = analyzer.analyze("EURUSD", Timeframe::H1).await;

    assert_eq!(analysis.result.action, Action::Buy);
    assert!(analysis.result.bull_votes >= 3);
    assert_eq!(analysis.result.bear_votes, 0);
    assert!(analysis.result.vetoes.is_empty());
    assert_eq!(analysis.result.technical_total, 16);
    assert_eq!(analysis.result.fundamental_total, 6);
    assert_eq!(analysis.context.price, Some(last_close));
    assert_eq!(analysis.context.source.as_deref(), Some("stub"));
    assert_eq!(analysis.context.support.len(), 3);
    assert!(analysis.snapshot.is_some());
    assert!(analysis.message.contains("*BUY*"));
    assert!(analysis.message.contains("📉 Spread: 0.8 pips"));
}

#[tokio::test]
async fn conservative_fundamentals_veto_everything() {
    let analyzer = analyzer_with(Arc::new(StubMarketData { candles: uptrend(300) }), false);

    let analysis = analyzer.analyze("EURUSD", Timeframe::H1).await;

    assert_eq!(analysis.result.action, Action::Wait);
    assert_eq!(
        analysis.result.vetoes,
        vec!["red news < 1h", "spread too high", "mid-candle window"]
    );
    assert_eq!(analysis.notes, vec!["no fundamental data source"]);
    assert!(analysis.message.contains("calendar risk, spread, mid-candle"));
}

#[tokio::test]
async fn market_data_failure_degrades_to_wait() {
    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let analyzer = analyzer_with(Arc::new(BrokenMarketData), true).with_metrics(metrics.clone());

    let analysis = analyzer.analyze("EURUSD", Timeframe::H1).await;

    assert_eq!(analysis.result.action, Action::Wait);
    assert_eq!(analysis.result.vetoes, vec!["market data unavailable"]);
    assert_eq!(analysis.notes.len(), 1);
    assert!(analysis.snapshot.is_none());
    assert_eq!(metrics.market_data_errors_total.get(), 1);
    assert_eq!(
        metrics
            .signals_evaluated_total
            .with_label_values(&["WAIT"])
            .get(),
        1
    );
}

#[tokio::test]
async fn single_candle_is_insufficient() {
    let analyzer = analyzer_with(Arc::new(StubMarketData { candles: uptrend(1) }), true);

    let analysis = analyzer.analyze("EURUSD", Timeframe::H1).await;

    assert_eq!(analysis.result.action, Action::Wait);
    assert_eq!(analysis.result.vetoes, vec!["insufficient candles"]);
}

#[tokio::test]
async fn candle_limit_is_forwarded() {
    let analyzer = analyzer_with(Arc::new(StubMarketData { candles: uptrend(300) }), true)
        .with_candle_limit(50);

    let analysis = analyzer.analyze("EURUSD", Timeframe::H1).await;

    // 50 bars cannot support the 200-period EMA
    let snapshot = analysis.snapshot.expect("snapshot");
    assert!(snapshot.ema(200).is_none());
    assert!(snapshot.ema(21).is_some());
}

#[tokio::test]
async fn runtime_appends_to_jsonl_log() {
    let dir = tempdir().unwrap();
    let log = Arc::new(JsonlSignalLog::new(dir.path().join("signals.jsonl")));
    let analyzer = Arc::new(
        analyzer_with(Arc::new(StubMarketData { candles: uptrend(300) }), true)
            .with_spread(Some(0.8)),
    );
    let config = RuntimeConfig {
        evaluation_interval_seconds: 60,
        symbols: vec!["EURUSD".to_string(), "GBPUSD".to_string()],
        timeframe: Timeframe::H1,
    };
    let runtime = SignalRuntime::new(config, analyzer).with_log(log.clone());

    runtime.evaluate_once().await;
    runtime.evaluate_once().await;

    let records = log.recent(10).await.unwrap();
    assert_eq!(records.len(), 4);
    let symbols: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["EURUSD", "GBPUSD", "EURUSD", "GBPUSD"]);
    assert!(records.iter().all(|r| r.action == Action::Buy));
    assert!(records.iter().all(|r| r.price.is_some()));
}
