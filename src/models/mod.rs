//! Shared data models spanning the engine layers.

pub mod candle;
pub mod flags;
pub mod indicators;
pub mod signal;

pub use candle::{Candle, Timeframe};
pub use flags::{FlagBundle, FlagSet};
pub use indicators::{
    AdxIndicator, AtrIndicator, EmaIndicator, IndicatorSnapshot, MacdIndicator, PriceLevels,
    RsiIndicator, VolumeIndicator,
};
pub use signal::{Action, ConfidenceBand, PriceContext, ScoreResult};
