//! Core application primitives (analysis pipeline, runtime loop, HTTP)

pub mod analyzer;
pub mod http;
pub mod runtime;

pub use analyzer::{Analysis, Analyzer};
pub use http::{create_router, start_server, AppState, HealthStatus};
pub use runtime::{RuntimeConfig, SignalRuntime};
