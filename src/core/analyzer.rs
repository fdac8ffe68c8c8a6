//! Fetch, compute, score: one symbol at a time.
//!
//! Every upstream failure degrades to a WAIT result carrying the reason as a
//! veto, so callers always get a well-formed analysis back.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::fundamentals::{
    ContextFundamentals, FinnhubCalendarClient, FundamentalContext, FundamentalProvider,
    NewsApiClient,
};
use crate::indicators::{CandleIndicatorProvider, IndicatorProvider};
use crate::metrics::Metrics;
use crate::models::{FlagBundle, IndicatorSnapshot, PriceContext, ScoreResult, Timeframe};
use crate::presentation::render_signal_message;
use crate::services::{build_market_data_provider, MarketDataProvider};
use crate::signals::{DirectionalClassification, SignalScorer, VetoRules};

pub const DEFAULT_CANDLE_LIMIT: usize = 300;

pub const REASON_MARKET_DATA_UNAVAILABLE: &str = "market data unavailable";
pub const REASON_NO_CANDLES: &str = "no candles";
pub const REASON_INSUFFICIENT_CANDLES: &str = "insufficient candles";

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub context: PriceContext,
    pub result: ScoreResult,
    pub flags: FlagBundle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<IndicatorSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub message: String,
}

impl Analysis {
    fn build(
        context: PriceContext,
        result: ScoreResult,
        flags: FlagBundle,
        snapshot: Option<IndicatorSnapshot>,
        notes: Vec<String>,
    ) -> Self {
        let message = render_signal_message(&context, &result);
        Self {
            context,
            result,
            flags,
            snapshot,
            notes,
            message,
        }
    }
}

pub struct Analyzer {
    market_data: Arc<dyn MarketDataProvider>,
    indicators: Arc<dyn IndicatorProvider>,
    fundamentals: Arc<dyn FundamentalProvider>,
    scorer: Arc<SignalScorer>,
    metrics: Option<Arc<Metrics>>,
    candle_limit: usize,
    spread_pips: Option<f64>,
}

impl Analyzer {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        indicators: Arc<dyn IndicatorProvider>,
        fundamentals: Arc<dyn FundamentalProvider>,
        scorer: Arc<SignalScorer>,
    ) -> Self {
        Self {
            market_data,
            indicators,
            fundamentals,
            scorer,
            metrics: None,
            candle_limit: DEFAULT_CANDLE_LIMIT,
            spread_pips: None,
        }
    }

    /// Vendors, calendar and news clients from the environment, standard indicators and scorer rules.
    pub fn from_config(config: &AppConfig, metrics: Option<Arc<Metrics>>) -> Self {
        let market_data = build_market_data_provider(&config.api_keys);

        let mut fundamentals = ContextFundamentals::new(config.max_spread_pips);
        if let Some(key) = &config.api_keys.finnhub {
            fundamentals =
                fundamentals.with_calendar(Arc::new(FinnhubCalendarClient::new(key.clone())));
        }
        if let Some(key) = &config.api_keys.news_api {
            fundamentals = fundamentals.with_news(Arc::new(NewsApiClient::new(key.clone())));
        }

        let scorer = SignalScorer::with_config(
            DirectionalClassification::standard(),
            VetoRules::standard(),
            config.scorer.clone(),
        );

        let mut analyzer = Self::new(
            market_data,
            Arc::new(CandleIndicatorProvider::new()),
            Arc::new(fundamentals),
            Arc::new(scorer),
        )
        .with_spread(config.spread_pips);
        if let Some(metrics) = metrics {
            analyzer = analyzer.with_metrics(metrics);
        }
        analyzer
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_candle_limit(mut self, limit: usize) -> Self {
        self.candle_limit = limit;
        self
    }

    /// Quoted spread fed to the fundamentals provider.
    pub fn with_spread(mut self, spread_pips: Option<f64>) -> Self {
        self.spread_pips = spread_pips;
        self
    }

    pub fn scorer(&self) -> &SignalScorer {
        &self.scorer
    }

    pub async fn analyze(&self, symbol: &str, timeframe: Timeframe) -> Analysis {
        self.analyze_at(symbol, timeframe, Utc::now()).await
    }

    pub async fn analyze_at(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Analysis {
        let mut context = PriceContext::new(symbol, timeframe.label())
            .with_source(self.market_data.name())
            .with_built_at(now);
        if let Some(spread) = self.spread_pips {
            context = context.with_spread(spread);
        }

        let candles = match self
            .market_data
            .get_candles(symbol, timeframe, self.candle_limit)
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Market data fetch failed");
                if let Some(metrics) = &self.metrics {
                    metrics.market_data_errors_total.inc();
                }
                return self.finish(Analysis::build(
                    context,
                    ScoreResult::unavailable(REASON_MARKET_DATA_UNAVAILABLE),
                    FlagBundle::default(),
                    None,
                    vec![e.to_string()],
                ));
            }
        };

        if candles.is_empty() {
            return self.finish(Analysis::build(
                context,
                ScoreResult::unavailable(REASON_NO_CANDLES),
                FlagBundle::default(),
                None,
                Vec::new(),
            ));
        }

        let Some(report) = self.indicators.compute(&candles, timeframe) else {
            return self.finish(Analysis::build(
                context,
                ScoreResult::unavailable(REASON_INSUFFICIENT_CANDLES),
                FlagBundle::default(),
                None,
                Vec::new(),
            ));
        };

        let fundamental_ctx = FundamentalContext::new(timeframe)
            .at(now)
            .with_spread(self.spread_pips);
        let fundamentals = self.fundamentals.evaluate(symbol, &fundamental_ctx).await;

        let bundle = FlagBundle::new(report.technical, fundamentals.flags);
        let result = self.scorer.score(&bundle);

        context = context.with_price(report.snapshot.price).with_levels(
            report.snapshot.levels.support.clone(),
            report.snapshot.levels.resistance.clone(),
        );

        self.finish(Analysis::build(
            context,
            result,
            bundle,
            Some(report.snapshot),
            fundamentals.notes,
        ))
    }

    fn finish(&self, analysis: Analysis) -> Analysis {
        if let Some(metrics) = &self.metrics {
            metrics.record_signal(analysis.result.action);
        }
        info!(
            symbol = %analysis.context.symbol,
            timeframe = %analysis.context.timeframe,
            action = %analysis.result.action,
            band = %analysis.result.confidence_band,
            composite = analysis.result.composite_score01,
            vetoes = ?analysis.result.vetoes,
            "Signal evaluated"
        );
        analysis
    }
}
