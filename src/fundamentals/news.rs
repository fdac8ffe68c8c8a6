//! NewsAPI headline client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::NewsError;

const NEWSAPI_BASE: &str = "https://newsapi.org/v2";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
}

pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: NEWSAPI_BASE.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Latest English headlines for `query`, newest first.
    pub async fn headlines(&self, query: &str, limit: usize) -> Result<Vec<String>, NewsError> {
        let page_size = limit.clamp(5, 100).to_string();
        let url = format!("{}/everything", self.base_url);

        debug!(query = %query, "Fetching news headlines");

        let response: EverythingResponse = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if response.status == "error" {
            return Err(NewsError::Api(
                response.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(response
            .articles
            .into_iter()
            .filter_map(|a| a.title)
            .filter(|t| !t.trim().is_empty())
            .take(limit)
            .collect())
    }
}

/// News search query for a symbol: gold aliases, FX pairs split into currencies.
pub fn symbol_to_query(symbol: &str) -> String {
    let s: String = symbol
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .collect();

    if matches!(s.as_str(), "XAUUSD" | "XAUUSDT" | "GOLD" | "GOLDUSD") {
        return "(XAUUSD OR \"gold price\" OR gold)".to_string();
    }

    if (6..=7).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic()) {
        let (base, quote) = (&s[..3], &s[3..6]);
        return format!(
            "(\"{base}{quote}\" OR \"{base} {quote}\" OR {base}) AND ({quote})"
        );
    }

    symbol.to_string()
}
