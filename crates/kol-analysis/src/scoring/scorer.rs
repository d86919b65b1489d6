//! InfluenceScorer — gates every profiled account and scores the ones that pass.

use std::time::{Duration, Instant};

use kol_core::KolConfig;
use rayon::prelude::*;

use crate::stats::{AccountMap, AccountStats};

use super::factors::{self, FactorInput};
use super::gate::QualificationGate;
use super::types::{GateCriterion, InfluenceScore};

/// Counters from one scoring pass.
#[derive(Debug, Clone, Default)]
pub struct ScoreStats {
    pub evaluated: usize,
    pub qualified: usize,
    pub failed_followers: usize,
    pub failed_engagement: usize,
    pub failed_post_count: usize,
    /// Accounts skipped because no profile was attached yet.
    pub skipped_unprofiled: usize,
    pub duration: Duration,
}

pub struct InfluenceScorer {
    gate: QualificationGate,
}

impl InfluenceScorer {
    pub fn new(gate: QualificationGate) -> Self {
        Self { gate }
    }

    pub fn from_config(config: &KolConfig) -> Self {
        Self::new(QualificationGate::from_config(config))
    }

    pub fn with_defaults() -> Self {
        Self::new(QualificationGate::default())
    }

    pub fn gate(&self) -> &QualificationGate {
        &self.gate
    }

    /// Score one account, ignoring the gate. `None` without a profile.
    pub fn score(&self, account: &AccountStats) -> Option<InfluenceScore> {
        let profile = account.profile.as_ref()?;
        let breakdown = factors::compute_breakdown(&FactorInput {
            follower_count: profile.follower_count.value,
            engagement_rate: account.engagement_rate,
            reach_score: account.reach_score,
            post_count: account.post_count,
            verified: profile.verified.value,
        });
        Some(InfluenceScore {
            total: factors::total(&breakdown),
            breakdown,
        })
    }

    /// Gate and score every account in parallel.
    ///
    /// Writes `gate` on every profiled account and `influence` on the ones
    /// that qualify. Accounts that fail keep `influence = None`.
    pub fn score_accounts(&self, mut accounts: AccountMap) -> (AccountMap, ScoreStats) {
        let start = Instant::now();

        accounts.as_mut_slice().par_iter_mut().for_each(|account| {
            let Some(profile) = account.profile.as_ref() else {
                return;
            };
            let outcome = self.gate.evaluate(account, profile.follower_count.value);
            if outcome.passed() {
                account.influence = self.score(account);
            }
            account.gate = Some(outcome);
        });

        let mut stats = ScoreStats::default();
        for account in accounts.iter() {
            let Some(outcome) = account.gate.as_ref() else {
                stats.skipped_unprofiled += 1;
                continue;
            };
            stats.evaluated += 1;
            if outcome.passed() {
                stats.qualified += 1;
            }
            for criterion in &outcome.failed {
                match criterion {
                    GateCriterion::Followers => stats.failed_followers += 1,
                    GateCriterion::Engagement => stats.failed_engagement += 1,
                    GateCriterion::PostCount => stats.failed_post_count += 1,
                }
            }
        }
        stats.duration = start.elapsed();

        if stats.skipped_unprofiled > 0 {
            tracing::warn!(
                skipped = stats.skipped_unprofiled,
                "accounts without a profile were not scored"
            );
        }
        tracing::info!(
            evaluated = stats.evaluated,
            qualified = stats.qualified,
            elapsed_ms = stats.duration.as_millis() as u64,
            "influence scored"
        );

        (accounts, stats)
    }
}

impl Default for InfluenceScorer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::factors::{MAX_SCORE, VERIFIED_MULTIPLIER};
    use crate::stats::test_support::{account, profile};

    fn profiled(id: &str, posts: u64, engagement: f64, followers: u64, verified: bool) -> AccountStats {
        let mut a = account(id, posts, engagement);
        a.profile = Some(profile(followers, verified));
        a
    }

    #[test]
    fn test_only_qualified_accounts_scored() {
        let map: AccountMap = vec![
            profiled("a", 20, 0.2, 15_000, true),
            profiled("b", 15, 0.5, 5_000, false),
            profiled("c", 5, 0.05, 20_000, false),
        ]
        .into_iter()
        .collect();

        let (map, stats) = InfluenceScorer::with_defaults().score_accounts(map);
        assert_eq!(stats.evaluated, 3);
        assert_eq!(stats.qualified, 1);
        assert_eq!(stats.failed_followers, 1);
        assert_eq!(stats.failed_engagement, 1);
        assert_eq!(stats.failed_post_count, 1);
        assert!(map.get("a").unwrap().is_qualified());
        assert!(!map.get("b").unwrap().is_qualified());
        assert!(map.get("b").unwrap().gate.is_some());
    }

    #[test]
    fn test_score_formula() {
        // followers 15k -> 0.6, engagement 0.2 -> 20, reach 100 -> 0.01, posts 20 -> 0.02
        let a = profiled("a", 20, 0.2, 15_000, false);
        let score = InfluenceScorer::with_defaults().score(&a).unwrap();
        assert!((score.total - 20.63).abs() < 1e-9, "{}", score.total);
        assert!(score.total <= MAX_SCORE);
    }

    #[test]
    fn test_verified_bonus_exact() {
        let scorer = InfluenceScorer::with_defaults();
        let plain = scorer.score(&profiled("a", 20, 0.2, 15_000, false)).unwrap();
        let verified = scorer.score(&profiled("a", 20, 0.2, 15_000, true)).unwrap();
        assert_eq!(verified.total, plain.total * VERIFIED_MULTIPLIER);
    }

    #[test]
    fn test_unprofiled_skipped() {
        let map: AccountMap = std::iter::once(account("x", 100, 5.0)).collect();
        let (map, stats) = InfluenceScorer::with_defaults().score_accounts(map);
        assert_eq!(stats.skipped_unprofiled, 1);
        assert!(map.get("x").unwrap().gate.is_none());
    }
}
