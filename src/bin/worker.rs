//! fxsignal Worker
//!
//! Evaluates every configured symbol on a fixed interval, prints the chat
//! message for each and appends results to the signal log when one is configured.

use std::sync::Arc;

use dotenvy::dotenv;
use fxsignal::config::AppConfig;
use fxsignal::core::analyzer::Analyzer;
use fxsignal::core::runtime::{RuntimeConfig, SignalRuntime};
use fxsignal::logging;
use fxsignal::metrics::Metrics;
use fxsignal::storage::JsonlSignalLog;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env()?;
    info!("Starting fxsignal Worker");
    info!(environment = %config.environment, "Environment");

    if config.eval_interval_seconds == 0 {
        return Err("EVAL_INTERVAL_SECONDS must be > 0 for worker".into());
    }

    let metrics = Arc::new(Metrics::new()?);
    let analyzer = Arc::new(Analyzer::from_config(&config, Some(metrics)));

    let runtime_config = RuntimeConfig {
        evaluation_interval_seconds: config.eval_interval_seconds,
        symbols: config.symbols.clone(),
        timeframe: config.timeframe,
    };
    info!(
        symbols = ?runtime_config.symbols,
        interval = runtime_config.evaluation_interval_seconds,
        "Signal Evaluation: every {} seconds", runtime_config.evaluation_interval_seconds
    );

    let mut runtime = SignalRuntime::new(runtime_config, analyzer);
    match &config.signal_log_path {
        Some(path) => {
            info!(path = %path.display(), "Recording signals");
            runtime = runtime.with_log(Arc::new(JsonlSignalLog::new(path.clone())));
        }
        None => warn!("SIGNAL_LOG_PATH not set; signals will not be recorded"),
    }

    runtime
        .run_until(async {
            if let Err(e) = signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for ctrl-c");
            }
        })
        .await;

    info!("Worker stopped");
    Ok(())
}
