//! Polling loop that evaluates every configured symbol on a fixed interval

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{error, info};

use crate::core::analyzer::{Analysis, Analyzer};
use crate::models::Timeframe;
use crate::storage::{SignalLog, SignalRecord};

/// Configuration for the evaluation loop
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub evaluation_interval_seconds: u64,
    pub symbols: Vec<String>,
    pub timeframe: Timeframe,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_seconds: 300,
            symbols: vec!["EURUSD".to_string()],
            timeframe: Timeframe::H1,
        }
    }
}

pub struct SignalRuntime {
    config: RuntimeConfig,
    analyzer: Arc<Analyzer>,
    log: Option<Arc<dyn SignalLog>>,
}

impl SignalRuntime {
    pub fn new(config: RuntimeConfig, analyzer: Arc<Analyzer>) -> Self {
        Self {
            config,
            analyzer,
            log: None,
        }
    }

    pub fn with_log(mut self, log: Arc<dyn SignalLog>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Evaluate all symbols concurrently, once. Results keep the configured symbol order.
    pub async fn evaluate_once(&self) -> Vec<Analysis> {
        let timeframe = self.config.timeframe;
        let analyses = join_all(
            self.config
                .symbols
                .iter()
                .map(|symbol| self.analyzer.analyze(symbol, timeframe)),
        )
        .await;

        if let Some(log) = &self.log {
            for analysis in &analyses {
                let record = SignalRecord::from_result(
                    analysis.context.symbol.clone(),
                    analysis.context.timeframe.clone(),
                    &analysis.result,
                    analysis.context.price,
                    analysis.context.built_at,
                );
                if let Err(e) = log.record(&record).await {
                    error!(symbol = %record.symbol, error = %e, "Failed to record signal");
                }
            }
        }

        analyses
    }

    /// Tick until `shutdown` resolves. The first tick fires immediately.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let period = Duration::from_secs(self.config.evaluation_interval_seconds.max(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(
            symbols = ?self.config.symbols,
            timeframe = %self.config.timeframe,
            interval_seconds = period.as_secs(),
            "SignalRuntime: starting evaluation loop"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("SignalRuntime: shutdown requested");
                    break;
                }
                _ = interval.tick() => {
                    let analyses = self.evaluate_once().await;
                    for analysis in &analyses {
                        println!("{}\n", analysis.message);
                    }
                }
            }
        }
    }
}
