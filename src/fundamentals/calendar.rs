//! Finnhub economic calendar and the red-news window.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CalendarError;

const FINNHUB_BASE: &str = "https://finnhub.io/api/v1";

pub const RED_NEWS_WINDOW_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// Impact from the event title. CPI, payrolls, rate decisions, jobs and GDP are High.
pub fn impact_of(event: &str) -> Impact {
    let key = event.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| key.contains(w));
    if any(&["cpi", "payroll", "interest rate", "rate decision", "jobs", "gdp"]) {
        Impact::High
    } else if any(&["pmi", "confidence", "trade balance", "minutes", "speech"]) {
        Impact::Medium
    } else {
        Impact::Low
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EconomicEvent {
    pub time: DateTime<Utc>,
    pub country: String,
    pub event: String,
    pub impact: Impact,
}

impl EconomicEvent {
    pub fn new(time: DateTime<Utc>, country: impl Into<String>, event: impl Into<String>) -> Self {
        let event = event.into();
        Self {
            time,
            country: country.into(),
            impact: impact_of(&event),
            event,
        }
    }

    pub fn currency(&self) -> Option<&'static str> {
        country_currency(&self.country)
    }
}

/// ISO country code to the currency its releases move.
pub fn country_currency(country: &str) -> Option<&'static str> {
    let code = country.trim().to_uppercase();
    let currency = match code.as_str() {
        "US" => "USD",
        "EU" | "EMU" | "EZ" | "DE" | "FR" | "IT" | "ES" => "EUR",
        "GB" | "UK" => "GBP",
        "JP" => "JPY",
        "CH" => "CHF",
        "CA" => "CAD",
        "AU" => "AUD",
        "NZ" => "NZD",
        "CN" => "CNY",
        _ => return None,
    };
    Some(currency)
}

/// Currencies a symbol is exposed to. Gold trades against the dollar.
pub fn pair_currencies(symbol: &str) -> Vec<String> {
    let s: String = symbol
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();

    if s.starts_with("XAU") || s.starts_with("GOLD") {
        return vec!["XAU".to_string(), "USD".to_string()];
    }
    if s.len() >= 6 {
        return vec![s[..3].to_string(), s[3..6].to_string()];
    }
    Vec::new()
}

/// First High-impact event for any of `currencies` within `window` of `now`, either side.
pub fn next_red_event<'a>(
    events: &'a [EconomicEvent],
    currencies: &[String],
    now: DateTime<Utc>,
    window: Duration,
) -> Option<&'a EconomicEvent> {
    events.iter().find(|e| {
        e.impact == Impact::High
            && (e.time - now).abs() <= window
            && e
                .currency()
                .is_some_and(|c| currencies.iter().any(|p| p == c))
    })
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    #[serde(rename = "economicCalendar", default)]
    economic_calendar: Vec<CalendarRow>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CalendarRow {
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    country: String,
    #[serde(default)]
    event: String,
}

fn parse_event_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        })
}

pub struct FinnhubCalendarClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FinnhubCalendarClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(StdDuration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: FINNHUB_BASE.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Events dated from the day before `now` to the day after. Rows without a readable time are skipped.
    pub async fn events_around(&self, now: DateTime<Utc>) -> Result<Vec<EconomicEvent>, CalendarError> {
        let from = (now - Duration::days(1)).date_naive().to_string();
        let to = (now + Duration::days(1)).date_naive().to_string();
        let url = format!("{}/calendar/economic", self.base_url);

        debug!(from = %from, to = %to, "Fetching economic calendar");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("token", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: CalendarResponse = response.json().await?;

        if let Some(message) = body.error {
            return Err(CalendarError::Api(message));
        }
        if !status.is_success() {
            return Err(CalendarError::Api(format!("status {}", status)));
        }

        Ok(body
            .economic_calendar
            .into_iter()
            .filter_map(|row| {
                let time = parse_event_time(row.time.as_deref()?)?;
                Some(EconomicEvent::new(time, row.country, row.event))
            })
            .collect())
    }
}
