//! Score and gate result types.

use serde::{Deserialize, Serialize};

/// The four capped components and the verified multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// min(followers / 1M, 1) × 40.
    pub follower: f64,
    /// min(engagement_rate × 100, 30).
    pub engagement: f64,
    /// min(reach / 10k, 20).
    pub reach: f64,
    /// min(posts / 1k, 10).
    pub activity: f64,
    /// Sum of the four components.
    pub base: f64,
    /// 1.2 for verified accounts, 1.0 otherwise.
    pub verified_multiplier: f64,
}

/// Final influence score for a qualified account. Range [0, 132].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfluenceScore {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}

/// A single qualification criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateCriterion {
    Followers,
    Engagement,
    PostCount,
}

/// Result of running an account through the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOutcome {
    /// Criteria the account failed. Empty means qualified.
    pub failed: Vec<GateCriterion>,
}

impl GateOutcome {
    pub fn passed(&self) -> bool {
        self.failed.is_empty()
    }
}
