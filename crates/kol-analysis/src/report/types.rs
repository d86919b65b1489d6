//! Report — the single immutable output of a run.
//!
//! Plain serde values. Encoding (JSON, CSV, HTTP) belongs to whoever
//! consumes the report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{Category, Tier};
use crate::graph::{CentralityScores, GraphMetrics};
use crate::scoring::ScoreBreakdown;
use crate::stats::Attribute;
use crate::timeline::ActivityTrend;

/// How the run was configured, enough to replay it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub generated_at: DateTime<Utc>,
    /// Seed used for synthesized attributes, configured or drawn.
    pub synthesis_seed: u64,
    pub batch_size: usize,
    /// `None` = unlimited.
    pub account_limit: Option<usize>,
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_accounts: usize,
    pub qualified_count: usize,
    /// 100 × qualified / total; 0 when there are no accounts.
    pub qualified_percentage: f64,
    pub malformed_posts: usize,
    pub malformed_edges: usize,
    pub dangling_edges: usize,
    /// Accounts with at least one synthesized profile attribute.
    pub synthesized_accounts: usize,
}

/// One entry of the headline ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAccount {
    /// 1-based.
    pub rank: usize,
    pub account_id: String,
    pub display_name: String,
    pub influence_score: f64,
    pub breakdown: ScoreBreakdown,
    /// `None` if no profile was attached; never filled with a stand-in.
    pub follower_count: Option<Attribute<u64>>,
    pub verified: Option<Attribute<bool>>,
    pub category: Category,
    pub tier: Tier,
    pub engagement_rate: f64,
    pub post_count: u64,
    pub centrality: Option<CentralityScores>,
    pub trend: Option<ActivityTrend>,
}

/// Distribution of scores over the qualified set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; 0 for a single score.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: RunMetadata,
    pub summary: ReportSummary,
    pub top_accounts: Vec<RankedAccount>,
    /// Every tier, zero counts included.
    pub tier_distribution: BTreeMap<Tier, usize>,
    /// Every category, zero counts included.
    pub category_distribution: BTreeMap<Category, usize>,
    pub graph_metrics: GraphMetrics,
    /// `None` when nothing qualified.
    pub score_statistics: Option<ScoreStatistics>,
}

impl Report {
    pub fn ranked(&self, account_id: &str) -> Option<&RankedAccount> {
        self.top_accounts.iter().find(|a| a.account_id == account_id)
    }

    /// A page of the ranking. `page` is 0-based; out-of-range pages are empty.
    pub fn page(&self, page: usize, per_page: usize) -> &[RankedAccount] {
        let start = page.saturating_mul(per_page).min(self.top_accounts.len());
        let end = start.saturating_add(per_page).min(self.top_accounts.len());
        &self.top_accounts[start..end]
    }
}
