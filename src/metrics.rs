//! Prometheus metrics shared by the HTTP server and the runtime loop.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::Action;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub signals_evaluated_total: IntCounterVec,
    pub market_data_errors_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::with_opts(Opts::new("http_requests_total", "Total HTTP requests"))?;
        let http_requests_in_flight = IntGauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let signals_evaluated_total = IntCounterVec::new(
            Opts::new("signals_evaluated_total", "Signals evaluated, by final action"),
            &["action"],
        )?;
        let market_data_errors_total = IntCounter::with_opts(Opts::new(
            "market_data_errors_total",
            "Failed market data fetches",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(signals_evaluated_total.clone()))?;
        registry.register(Box::new(market_data_errors_total.clone()))?;

        // Touch every action so all label values show up in the first scrape.
        for action in [Action::Buy, Action::Sell, Action::Wait] {
            signals_evaluated_total.with_label_values(&[action.as_str()]);
        }

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            signals_evaluated_total,
            market_data_errors_total,
        })
    }

    pub fn record_signal(&self, action: Action) {
        self.signals_evaluated_total
            .with_label_values(&[action.as_str()])
            .inc();
    }

    /// Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
