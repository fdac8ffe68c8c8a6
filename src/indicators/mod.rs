//! Technical indicators and the provider that turns them into flags.

pub mod momentum;
pub mod patterns;
pub mod provider;
pub mod structure;
pub mod timeframe;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use provider::{CandleIndicatorProvider, IndicatorProvider, IndicatorReport, IndicatorSettings};
