//! Qualification gate and the composite influence score.

pub mod factors;
pub mod gate;
pub mod scorer;
pub mod types;

pub use gate::QualificationGate;
pub use scorer::{InfluenceScorer, ScoreStats};
pub use types::{GateCriterion, GateOutcome, InfluenceScore, ScoreBreakdown};
