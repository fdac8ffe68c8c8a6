//! Market structure: pivots, divergences, levels and retracements

pub mod fibonacci;
pub mod pivots;
pub mod support_resistance;

pub use fibonacci::*;
pub use pivots::*;
pub use support_resistance::*;
