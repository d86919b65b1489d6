//! AccountStatsBuilder — batched, parallel aggregation of posts into accounts.

use std::time::{Duration, Instant};

use kol_core::KolConfig;
use rayon::prelude::*;

use crate::ingest::PostRecord;

use super::aggregate::{PartialAccount, PartialAggregate};
use super::types::{AccountMap, AccountStats};

/// Counters from one build.
#[derive(Debug, Clone, Default)]
pub struct StatsBuildStats {
    pub total_posts: usize,
    pub malformed_posts: usize,
    pub batches: usize,
    /// Distinct accounts seen before the account limit was applied.
    pub distinct_accounts: usize,
    /// Accounts dropped entirely by the account limit.
    pub excluded_accounts: usize,
    pub duration: Duration,
}

/// Builds the measured part of `AccountStats` from a post stream.
pub struct AccountStatsBuilder {
    /// Posts per batch. Always at least 1.
    pub batch_size: usize,
    /// Keep only the first N distinct accounts, in order of appearance.
    pub account_limit: Option<usize>,
}

impl AccountStatsBuilder {
    pub fn new() -> Self {
        Self::from_config(&KolConfig::default())
    }

    pub fn from_config(config: &KolConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            account_limit: config.effective_account_limit(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_account_limit(mut self, limit: Option<usize>) -> Self {
        self.account_limit = limit;
        self
    }

    /// Aggregate posts into an insertion-ordered account map.
    ///
    /// Batches are aggregated in parallel, then merged in batch order.
    pub fn build(&self, posts: &[PostRecord]) -> (AccountMap, StatsBuildStats) {
        let start = Instant::now();
        let batch_size = self.batch_size.max(1);

        let partials: Vec<PartialAggregate> = posts
            .par_chunks(batch_size)
            .enumerate()
            .map(|(i, chunk)| PartialAggregate::from_batch(i * batch_size, chunk))
            .collect();
        let batches = partials.len();

        let merged = partials
            .into_iter()
            .fold(PartialAggregate::default(), |mut acc, partial| {
                acc.merge(partial);
                acc
            });
        let malformed_posts = merged.malformed;

        let ordered = merged.into_ordered();
        let distinct_accounts = ordered.len();
        let keep = self.account_limit.unwrap_or(usize::MAX).min(distinct_accounts);

        let accounts: AccountMap = ordered
            .into_iter()
            .take(keep)
            .map(|(id, partial)| finalize(id, partial))
            .collect();

        let stats = StatsBuildStats {
            total_posts: posts.len(),
            malformed_posts,
            batches,
            distinct_accounts,
            excluded_accounts: distinct_accounts - keep,
            duration: start.elapsed(),
        };

        if malformed_posts > 0 {
            tracing::debug!(malformed_posts, "dropped posts without account id or text");
        }
        tracing::info!(
            posts = stats.total_posts,
            accounts = accounts.len(),
            excluded = stats.excluded_accounts,
            batches,
            elapsed_ms = stats.duration.as_millis() as u64,
            "account stats built"
        );

        (accounts, stats)
    }
}

impl Default for AccountStatsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn finalize(account_id: String, partial: PartialAccount) -> AccountStats {
    let posts = partial.post_count.max(1) as f64;
    let engagement = partial
        .total_likes
        .saturating_add(partial.total_retweets)
        .saturating_add(partial.total_replies);
    let display_name = partial
        .display_name
        .map(|(_, name)| name)
        .unwrap_or_else(|| format!("user_{account_id}"));

    AccountStats {
        display_name,
        post_count: partial.post_count,
        total_views: partial.total_views,
        total_likes: partial.total_likes,
        total_retweets: partial.total_retweets,
        total_replies: partial.total_replies,
        engagement_rate: engagement as f64 / posts,
        reach_score: partial.total_views as f64 / posts,
        last_active_at: partial.last_active_at,
        profile: None,
        gate: None,
        influence: None,
        category: None,
        tier: None,
        centrality: None,
        account_id,
    }
}
