//! Optional persistence of evaluated signals.

pub mod signal_log;

pub use signal_log::{JsonlSignalLog, MemorySignalLog, SignalLog, SignalRecord};
