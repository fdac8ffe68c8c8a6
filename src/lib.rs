//! fxsignal: veto-scored FX / commodity signal engine.
//!
//! Candles come in through a [`services::market_data::MarketDataProvider`], are turned
//! into technical flags by an [`indicators::provider::IndicatorProvider`], merged with
//! fundamental flags, and scored by [`signals::engine::SignalScorer`].

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod fundamentals;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod payload;
pub mod presentation;
pub mod services;
pub mod signals;
pub mod storage;
