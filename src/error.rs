//! Error types for each layer of the engine.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only error the scorer itself can raise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("invalid input at `{key}`: expected an object of boolean flags")]
    InvalidInput { key: String },
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP error from {provider}: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    #[error("{0} API key is not configured")]
    MissingApiKey(&'static str),

    #[error("{provider} does not support a {minutes}m timeframe")]
    UnsupportedTimeframe { provider: &'static str, minutes: u32 },

    #[error("failed to parse {provider} response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("signal log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("signal log encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("news request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("news API error: {0}")]
    Api(String),
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("calendar API error: {0}")]
    Api(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Errors returned by HTTP handlers, rendered as `{error, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Service Unavailable: {0}")]
    Unavailable(String),
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(
                    error_type = %"BadRequest",
                    status_code = %StatusCode::BAD_REQUEST,
                    message = %msg,
                    "Bad Request"
                );
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::Unavailable(msg) => {
                tracing::warn!(
                    error_type = %"Unavailable",
                    status_code = %StatusCode::SERVICE_UNAVAILABLE,
                    message = %msg,
                    "Service unavailable"
                );
                (StatusCode::SERVICE_UNAVAILABLE, "Unavailable", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });
        (status, body).into_response()
    }
}
