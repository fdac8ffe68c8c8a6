//! Fundamentals derived from spread, clock, the economic calendar and headlines.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::models::flags::fundamental;
use crate::models::Timeframe;

use super::calendar::{
    next_red_event, pair_currencies, FinnhubCalendarClient, RED_NEWS_WINDOW_MINUTES,
};
use super::news::{symbol_to_query, NewsApiClient};
use super::sentiment::score_headlines;
use super::{all_false, FundamentalContext, FundamentalProvider, FundamentalReport};

pub const DEFAULT_MID_CANDLE_GUARD: f64 = 0.2;
pub const DEFAULT_HEADLINE_LIMIT: usize = 12;

/// Fraction of the current candle that has elapsed at `now`, candles aligned to the epoch.
pub fn candle_elapsed_fraction(now: DateTime<Utc>, timeframe: Timeframe) -> f64 {
    let period = timeframe.seconds();
    let ts = now.timestamp();
    ts.rem_euclid(period) as f64 / period as f64
}

/// True near a candle boundary: within `guard` of its open or its close.
pub fn is_outside_mid_candle(now: DateTime<Utc>, timeframe: Timeframe, guard: f64) -> bool {
    let elapsed = candle_elapsed_fraction(now, timeframe);
    elapsed <= guard || elapsed >= 1.0 - guard
}

pub struct ContextFundamentals {
    max_spread_pips: f64,
    mid_candle_guard: f64,
    calendar: Option<Arc<FinnhubCalendarClient>>,
    news: Option<Arc<NewsApiClient>>,
}

impl ContextFundamentals {
    pub fn new(max_spread_pips: f64) -> Self {
        Self {
            max_spread_pips,
            mid_candle_guard: DEFAULT_MID_CANDLE_GUARD,
            calendar: None,
            news: None,
        }
    }

    /// Without a calendar `no_red_news_within_1h` stays false.
    pub fn with_calendar(mut self, client: Arc<FinnhubCalendarClient>) -> Self {
        self.calendar = Some(client);
        self
    }

    pub fn with_news(mut self, client: Arc<NewsApiClient>) -> Self {
        self.news = Some(client);
        self
    }

    pub fn with_mid_candle_guard(mut self, guard: f64) -> Self {
        self.mid_candle_guard = guard;
        self
    }
}

#[async_trait]
impl FundamentalProvider for ContextFundamentals {
    async fn evaluate(&self, symbol: &str, ctx: &FundamentalContext) -> FundamentalReport {
        let mut report = FundamentalReport::new(all_false());

        match ctx.spread_pips {
            Some(spread) => {
                report
                    .flags
                    .set(fundamental::SPREAD_ACCEPTABLE, spread <= self.max_spread_pips);
            }
            None => report.notes.push("spread unknown".to_string()),
        }

        report.flags.set(
            fundamental::NOT_MID_CANDLE,
            is_outside_mid_candle(ctx.now, ctx.timeframe, self.mid_candle_guard),
        );

        if let Some(calendar) = &self.calendar {
            match calendar.events_around(ctx.now).await {
                Ok(events) => {
                    let currencies = pair_currencies(symbol);
                    let window = Duration::minutes(RED_NEWS_WINDOW_MINUTES);
                    match next_red_event(&events, &currencies, ctx.now, window) {
                        Some(event) => report.notes.push(format!(
                            "high-impact event: {} {} at {}",
                            event.country,
                            event.event,
                            event.time.format("%H:%M UTC")
                        )),
                        None => report.flags.set(fundamental::NO_RED_NEWS_WITHIN_1H, true),
                    }
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Economic calendar unavailable");
                    report.notes.push(format!("calendar unavailable: {}", e));
                }
            }
        }

        if let Some(news) = &self.news {
            let query = symbol_to_query(symbol);
            match news.headlines(&query, DEFAULT_HEADLINE_LIMIT).await {
                Ok(headlines) => {
                    let summary = score_headlines(&headlines);
                    report
                        .flags
                        .set(fundamental::NEWS_SENTIMENT_SUPPORTIVE, summary.is_supportive());
                    report.sentiment = Some(summary);
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "News sentiment unavailable");
                    report.notes.push(format!("news unavailable: {}", e));
                }
            }
        }

        report
    }
}
