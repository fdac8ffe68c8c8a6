//! Market data vendors.

pub mod alphavantage;
pub mod eodhd;
pub mod market_data;
pub mod twelvedata;

use std::sync::Arc;

use tracing::info;

use crate::config::ApiKeys;

pub use alphavantage::AlphaVantageProvider;
pub use eodhd::EodhdProvider;
pub use market_data::{FallbackMarketDataProvider, MarketDataProvider, PlaceholderMarketDataProvider};
pub use twelvedata::TwelveDataProvider;

/// Every vendor with a configured key, in preference order: TwelveData, AlphaVantage, EODHD.
pub fn build_market_data_provider(keys: &ApiKeys) -> Arc<dyn MarketDataProvider> {
    let mut providers: Vec<Arc<dyn MarketDataProvider>> = Vec::new();

    if keys.twelve_data.is_some() {
        providers.push(Arc::new(TwelveDataProvider::new(keys.twelve_data.clone())));
    }
    if keys.alpha_vantage.is_some() {
        providers.push(Arc::new(AlphaVantageProvider::new(keys.alpha_vantage.clone())));
    }
    if let (Some(template), Some(_)) = (&keys.eodhd_url_template, &keys.eodhd) {
        providers.push(Arc::new(EodhdProvider::new(template.clone(), keys.eodhd.clone())));
    }

    if providers.is_empty() {
        info!("No market data API keys configured; using placeholder provider");
        return Arc::new(PlaceholderMarketDataProvider);
    }

    let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
    info!(providers = ?names, "Market data providers configured");
    Arc::new(FallbackMarketDataProvider::new(providers))
}
