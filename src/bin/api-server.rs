//! fxsignal API Server
//!
//! HTTP API with health check, metrics, payload scoring and on-demand analysis.
//! Stateless; can be horizontally scaled.

use std::sync::Arc;

use dotenvy::dotenv;
use fxsignal::config::AppConfig;
use fxsignal::core::analyzer::Analyzer;
use fxsignal::core::http::{start_server, AppState};
use fxsignal::logging;
use fxsignal::metrics::Metrics;
use fxsignal::signals::{DirectionalClassification, SignalScorer, VetoRules};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env()?;
    info!("Starting fxsignal API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let metrics = Arc::new(Metrics::new()?);
    let scorer = Arc::new(SignalScorer::with_config(
        DirectionalClassification::standard(),
        VetoRules::standard(),
        config.scorer.clone(),
    ));
    let analyzer = Arc::new(Analyzer::from_config(&config, Some(metrics.clone())));
    let state = AppState::new(metrics, scorer).with_analyzer(analyzer);

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
