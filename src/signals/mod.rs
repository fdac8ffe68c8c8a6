//! Veto-scored decision rule over technical and fundamental flags.

pub mod aggregation;
pub mod classification;
pub mod decision;
pub mod engine;
pub mod scoring;
pub mod vetoes;

pub use aggregation::VoteTally;
pub use classification::{DirectionTag, DirectionalClassification};
pub use decision::{apply_weak_downgrade, decide, risk_notes};
pub use engine::SignalScorer;
pub use scoring::{clamp01, composite_score, confidence_band};
pub use vetoes::{VetoRule, VetoRules};
