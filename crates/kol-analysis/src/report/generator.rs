//! ReportGenerator — read-only ranking and aggregation pass.

use std::collections::BTreeMap;

use kol_core::types::collections::FxHashMap;
use kol_core::KolConfig;
use statrs::statistics::{Data, Median, Statistics};

use crate::classify::{categorize, determine_tier, Category, Tier};
use crate::graph::GraphMetrics;
use crate::scoring::InfluenceScore;
use crate::stats::{AccountMap, AccountStats};
use crate::timeline::ActivityProfile;

use super::types::{RankedAccount, Report, ReportSummary, RunMetadata, ScoreStatistics};

/// Everything the report reads. Nothing here is modified.
pub struct ReportContext<'a> {
    pub accounts: &'a AccountMap,
    pub graph_metrics: &'a GraphMetrics,
    pub activity: &'a FxHashMap<String, ActivityProfile>,
    pub metadata: RunMetadata,
    pub malformed_posts: usize,
    pub malformed_edges: usize,
    pub dangling_edges: usize,
}

pub struct ReportGenerator {
    pub top_n: usize,
}

impl ReportGenerator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn from_config(config: &KolConfig) -> Self {
        Self::new(config.top_n)
    }

    pub fn generate(&self, ctx: ReportContext<'_>) -> Report {
        let accounts = ctx.accounts;

        // Stable sort, so equal scores keep account-map order.
        let mut qualified: Vec<(&AccountStats, &InfluenceScore)> = accounts
            .iter()
            .filter_map(|a| a.influence.as_ref().map(|score| (a, score)))
            .collect();
        qualified.sort_by(|a, b| b.1.total.total_cmp(&a.1.total));

        let total_accounts = accounts.len();
        let qualified_count = qualified.len();
        let summary = ReportSummary {
            total_accounts,
            qualified_count,
            qualified_percentage: if total_accounts == 0 {
                0.0
            } else {
                qualified_count as f64 / total_accounts as f64 * 100.0
            },
            malformed_posts: ctx.malformed_posts,
            malformed_edges: ctx.malformed_edges,
            dangling_edges: ctx.dangling_edges,
            synthesized_accounts: accounts
                .iter()
                .filter(|a| a.profile.is_some_and(|p| p.has_synthesized()))
                .count(),
        };

        let mut tier_distribution: BTreeMap<Tier, usize> = Tier::all().iter().map(|&t| (t, 0)).collect();
        let mut category_distribution: BTreeMap<Category, usize> =
            Category::all().iter().map(|&c| (c, 0)).collect();
        for &(account, score) in &qualified {
            *tier_distribution.entry(tier_of(account, score.total)).or_default() += 1;
            *category_distribution.entry(category_of(account)).or_default() += 1;
        }

        let top_accounts: Vec<RankedAccount> = qualified
            .iter()
            .take(self.top_n)
            .enumerate()
            .map(|(i, &(account, score))| ranked(i + 1, account, score, ctx.activity))
            .collect();

        let scores: Vec<f64> = qualified.iter().map(|&(_, score)| score.total).collect();
        let score_statistics = score_statistics(&scores);

        tracing::info!(
            total = total_accounts,
            qualified = qualified_count,
            ranked = top_accounts.len(),
            "report generated"
        );

        Report {
            metadata: ctx.metadata,
            summary,
            top_accounts,
            tier_distribution,
            category_distribution,
            graph_metrics: ctx.graph_metrics.clone(),
            score_statistics,
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::from_config(&KolConfig::default())
    }
}

// Classification normally ran already; fall back without writing anything.
fn tier_of(account: &AccountStats, score: f64) -> Tier {
    account.tier.unwrap_or_else(|| determine_tier(score))
}

fn category_of(account: &AccountStats) -> Category {
    account
        .category
        .unwrap_or_else(|| categorize(&account.display_name))
}

fn ranked(
    rank: usize,
    account: &AccountStats,
    score: &InfluenceScore,
    activity: &FxHashMap<String, ActivityProfile>,
) -> RankedAccount {
    RankedAccount {
        rank,
        account_id: account.account_id.clone(),
        display_name: account.display_name.clone(),
        influence_score: score.total,
        breakdown: score.breakdown,
        follower_count: account.profile.map(|p| p.follower_count),
        verified: account.profile.map(|p| p.verified),
        category: category_of(account),
        tier: tier_of(account, score.total),
        engagement_rate: account.engagement_rate,
        post_count: account.post_count,
        centrality: account.centrality,
        trend: activity.get(&account.account_id).map(|p| p.trend),
    }
}

/// Mean, median, spread and range of the qualified scores.
pub fn score_statistics(scores: &[f64]) -> Option<ScoreStatistics> {
    if scores.is_empty() {
        return None;
    }
    let std_dev = if scores.len() > 1 {
        scores.iter().std_dev()
    } else {
        0.0
    };
    Some(ScoreStatistics {
        mean: scores.iter().mean(),
        median: Data::new(scores.to_vec()).median(),
        std_dev,
        min: Statistics::min(scores.iter()),
        max: Statistics::max(scores.iter()),
    })
}
