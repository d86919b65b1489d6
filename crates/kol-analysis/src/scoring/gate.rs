//! The qualification gate: all three thresholds must hold.

use kol_core::KolConfig;

use crate::stats::AccountStats;

use super::types::{GateCriterion, GateOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct QualificationGate {
    pub min_followers: u64,
    pub min_engagement: f64,
    pub min_post_count: u64,
}

impl Default for QualificationGate {
    fn default() -> Self {
        Self::from_config(&KolConfig::default())
    }
}

impl QualificationGate {
    pub fn from_config(config: &KolConfig) -> Self {
        Self {
            min_followers: config.min_followers,
            min_engagement: config.min_engagement,
            min_post_count: config.min_post_count,
        }
    }

    /// Evaluate an account against a follower count (measured or synthesized).
    pub fn evaluate(&self, account: &AccountStats, follower_count: u64) -> GateOutcome {
        let mut failed = Vec::new();
        if follower_count < self.min_followers {
            failed.push(GateCriterion::Followers);
        }
        // NaN never qualifies.
        if !(account.engagement_rate >= self.min_engagement) {
            failed.push(GateCriterion::Engagement);
        }
        if account.post_count < self.min_post_count {
            failed.push(GateCriterion::PostCount);
        }
        GateOutcome { failed }
    }
}
