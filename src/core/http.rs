//! HTTP endpoint server using Axum
//!
//! `/health`, `/metrics`, `POST /api/score` and `GET /api/analyze/{symbol}`.

use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::core::analyzer::{Analysis, Analyzer};
use crate::error::{ApiError, PayloadError};
use crate::metrics::Metrics;
use crate::models::Timeframe;
use crate::payload::{score_payload, FinalSignal, SignalPayload};
use crate::presentation::render_signal_message;
use crate::signals::SignalScorer;

pub const SERVICE_NAME: &str = "fxsignal-engine";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub scorer: Arc<SignalScorer>,
    pub analyzer: Option<Arc<Analyzer>>,
}

impl AppState {
    pub fn new(metrics: Arc<Metrics>, scorer: Arc<SignalScorer>) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            scorer,
            analyzer: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Arc<Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Degraded when scoring works but live analysis is not configured.
    pub fn health(&self) -> HealthStatus {
        if self.analyzer.is_some() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": state.health(),
        "analyzer": state.analyzer.is_some(),
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub timeframe: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub signal: FinalSignal,
    pub message: String,
}

/// Score a flag payload supplied by the caller
async fn score_payload_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScoreResponse>, ApiError> {
    let value: Value = serde_json::from_slice(&body).map_err(PayloadError::from)?;
    let payload = SignalPayload::from_value(&value)?;
    let (result, signal) = score_payload(&state.scorer, &payload);
    state.metrics.record_signal(result.action);
    let message = render_signal_message(&payload.price_context(), &result);
    Ok(Json(ScoreResponse { signal, message }))
}

/// Run the full pipeline for one symbol
async fn analyze_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<Json<Analysis>, ApiError> {
    let analyzer = state
        .analyzer
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("analysis pipeline not configured".to_string()))?;
    let timeframe = params
        .timeframe
        .map(Timeframe::from_minutes)
        .unwrap_or_default();
    let analysis = analyzer.analyze(&symbol.to_uppercase(), timeframe).await;
    Ok(Json(analysis))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/score", post(score_payload_handler))
        .route("/api/analyze/{symbol}", get(analyze_symbol))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
