//! Environment-driven configuration.
//!
//! `.env` is loaded by the binaries through `dotenvy`; everything here reads
//! `std::env` and falls back to defaults when a variable is absent.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Timeframe;

/// Deployment environment from `APP_ENV` or `ENVIRONMENT`, lowercased. Defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .map(|v| v.trim().to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production() -> bool {
    matches!(get_environment().as_str(), "production" | "prod")
}

/// Non-empty value of an env var.
fn read_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an env var, failing on values that are present but malformed.
fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match read_var(key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        None => Ok(None),
    }
}

/// Weights, vote threshold and band cut-offs for the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    pub technical_weight: f64,
    pub fundamental_weight: f64,
    pub min_votes: usize,
    pub high_threshold: f64,
    pub medium_threshold: f64,
    pub low_threshold: f64,
    pub weak_threshold: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            technical_weight: 0.7,
            fundamental_weight: 0.3,
            min_votes: 3,
            high_threshold: 0.70,
            medium_threshold: 0.50,
            low_threshold: 0.30,
            weak_threshold: 0.30,
        }
    }
}

impl ScorerConfig {
    /// Defaults overridden by `SCORE_W_TECH`, `SCORE_W_FUND`, `SCORE_MIN_VOTES`
    /// and `SCORE_WEAK_THRESHOLD`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(w) = parse_var("SCORE_W_TECH")? {
            config.technical_weight = w;
        }
        if let Some(w) = parse_var("SCORE_W_FUND")? {
            config.fundamental_weight = w;
        }
        if let Some(v) = parse_var("SCORE_MIN_VOTES")? {
            config.min_votes = v;
        }
        if let Some(t) = parse_var("SCORE_WEAK_THRESHOLD")? {
            config.weak_threshold = t;
        }
        Ok(config)
    }
}

/// Credentials for the market data, calendar and news vendors. All optional.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub twelve_data: Option<String>,
    pub alpha_vantage: Option<String>,
    pub eodhd: Option<String>,
    pub eodhd_url_template: Option<String>,
    pub news_api: Option<String>,
    pub finnhub: Option<String>,
}

impl ApiKeys {
    pub fn from_env() -> Self {
        Self {
            twelve_data: read_var("TWELVE_DATA_API_KEY"),
            alpha_vantage: read_var("ALPHA_VANTAGE_API_KEY"),
            eodhd: read_var("EODHD_API_KEY"),
            eodhd_url_template: read_var("EODHD_URL_TEMPLATE"),
            news_api: read_var("NEWS_API_KEY"),
            finnhub: read_var("FINNHUB_API_KEY"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub api_keys: ApiKeys,
    pub symbols: Vec<String>,
    pub timeframe: Timeframe,
    pub eval_interval_seconds: u64,
    pub port: u16,
    pub signal_log_path: Option<PathBuf>,
    pub max_spread_pips: f64,
    pub spread_pips: Option<f64>,
    pub scorer: ScorerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            api_keys: ApiKeys::default(),
            symbols: vec!["EURUSD".to_string(), "XAUUSD".to_string()],
            timeframe: Timeframe::H1,
            eval_interval_seconds: 300,
            port: 8080,
            signal_log_path: None,
            max_spread_pips: 2.0,
            spread_pips: None,
            scorer: ScorerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let symbols = read_var("SYMBOLS")
            .map(|raw| parse_symbols(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.symbols);

        let timeframe = parse_var::<u32>("TIMEFRAME_MINUTES")?
            .map(Timeframe::from_minutes)
            .unwrap_or(defaults.timeframe);

        Ok(Self {
            environment: get_environment(),
            api_keys: ApiKeys::from_env(),
            symbols,
            timeframe,
            eval_interval_seconds: parse_var("EVAL_INTERVAL_SECONDS")?
                .unwrap_or(defaults.eval_interval_seconds),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            signal_log_path: read_var("SIGNAL_LOG_PATH").map(PathBuf::from),
            max_spread_pips: parse_var("MAX_SPREAD_PIPS")?.unwrap_or(defaults.max_spread_pips),
            spread_pips: parse_var("SPREAD_PIPS")?,
            scorer: ScorerConfig::from_env()?,
        })
    }
}

/// Comma or whitespace separated, uppercased, `/` removed, duplicates dropped.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in raw.split(|c: char| c == ',' || c.is_whitespace()) {
        let symbol = token.trim().replace('/', "").to_uppercase();
        if !symbol.is_empty() && !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}
