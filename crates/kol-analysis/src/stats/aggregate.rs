//! Partial per-account aggregates and their merge.
//!
//! Every field merges with an associative, commutative operation (saturating
//! sum, min position, max timestamp), so the merged result does not depend on
//! how the post stream was split into batches.

use chrono::{DateTime, Utc};
use kol_core::types::collections::FxHashMap;

use crate::ingest::PostRecord;

/// Running totals for one account within some subset of the posts.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialAccount {
    /// Global position of the account's first post.
    pub first_seen: usize,
    /// Earliest display name seen, with its global position.
    pub display_name: Option<(usize, String)>,
    pub post_count: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_retweets: u64,
    pub total_replies: u64,
    pub last_active_at: DateTime<Utc>,
}

impl PartialAccount {
    fn from_post(position: usize, post: &PostRecord) -> Self {
        Self {
            first_seen: position,
            display_name: post.display_name.clone().map(|name| (position, name)),
            post_count: 1,
            total_views: post.views,
            total_likes: post.likes,
            total_retweets: post.retweets,
            total_replies: post.replies,
            last_active_at: post.created_at,
        }
    }

    /// Fold another partial for the same account into this one.
    pub fn merge(&mut self, other: PartialAccount) {
        self.first_seen = self.first_seen.min(other.first_seen);
        self.display_name = match (self.display_name.take(), other.display_name) {
            (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
            (a, b) => a.or(b),
        };
        self.post_count = self.post_count.saturating_add(other.post_count);
        self.total_views = self.total_views.saturating_add(other.total_views);
        self.total_likes = self.total_likes.saturating_add(other.total_likes);
        self.total_retweets = self.total_retweets.saturating_add(other.total_retweets);
        self.total_replies = self.total_replies.saturating_add(other.total_replies);
        self.last_active_at = self.last_active_at.max(other.last_active_at);
    }
}

/// Partials for every account seen in a batch, plus the batch's drop count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAggregate {
    pub accounts: FxHashMap<String, PartialAccount>,
    pub malformed: usize,
}

impl PartialAggregate {
    /// Aggregate one batch. `offset` is the global position of `posts[0]`.
    pub fn from_batch(offset: usize, posts: &[PostRecord]) -> Self {
        let mut aggregate = Self::default();
        for (i, post) in posts.iter().enumerate() {
            let Some(id) = post.identity() else {
                aggregate.malformed += 1;
                continue;
            };
            let partial = PartialAccount::from_post(offset + i, post);
            match aggregate.accounts.get_mut(id) {
                Some(existing) => existing.merge(partial),
                None => {
                    aggregate.accounts.insert(id.to_string(), partial);
                }
            }
        }
        aggregate
    }

    /// Keyed merge of another aggregate into this one.
    pub fn merge(&mut self, other: PartialAggregate) {
        self.malformed += other.malformed;
        for (id, partial) in other.accounts {
            match self.accounts.get_mut(&id) {
                Some(existing) => existing.merge(partial),
                None => {
                    self.accounts.insert(id, partial);
                }
            }
        }
    }

    /// Accounts ordered by first appearance.
    pub fn into_ordered(self) -> Vec<(String, PartialAccount)> {
        let mut ordered: Vec<(String, PartialAccount)> = self.accounts.into_iter().collect();
        ordered.sort_by_key(|(_, partial)| partial.first_seen);
        ordered
    }
}
