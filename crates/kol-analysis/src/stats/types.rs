//! `AccountStats` and the insertion-ordered `AccountMap`.

use chrono::{DateTime, Utc};
use kol_core::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::classify::{Category, Tier};
use crate::graph::types::CentralityScores;
use crate::scoring::types::{GateOutcome, InfluenceScore};

/// Where an attribute value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Measured,
    Synthesized,
}

/// A profile value tagged with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attribute<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Attribute<T> {
    pub fn measured(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Measured,
        }
    }

    pub fn synthesized(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Synthesized,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.provenance == Provenance::Synthesized
    }
}

/// Profile attributes the posts themselves cannot tell us.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub follower_count: Attribute<u64>,
    pub following_count: Attribute<u64>,
    pub account_age_days: Attribute<u32>,
    pub verified: Attribute<bool>,
}

impl AccountProfile {
    /// True if any attribute was synthesized.
    pub fn has_synthesized(&self) -> bool {
        self.follower_count.is_synthesized()
            || self.following_count.is_synthesized()
            || self.account_age_days.is_synthesized()
            || self.verified.is_synthesized()
    }
}

/// Everything known about one account.
///
/// The measured block is filled by the stats builder. Each `Option` field is
/// written by exactly one later stage and stays `None` until that stage runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStats {
    pub account_id: String,
    pub display_name: String,
    pub post_count: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_retweets: u64,
    pub total_replies: u64,
    /// (likes + retweets + replies) / max(post_count, 1).
    pub engagement_rate: f64,
    /// total_views / max(post_count, 1).
    pub reach_score: f64,
    pub last_active_at: DateTime<Utc>,

    /// Set by the augmenter.
    pub profile: Option<AccountProfile>,
    /// Set by the scorer for every account it evaluated.
    pub gate: Option<GateOutcome>,
    /// Set by the scorer, qualified accounts only.
    pub influence: Option<InfluenceScore>,
    pub category: Option<Category>,
    pub tier: Option<Tier>,
    /// Set by the centrality analyzer when the graph has more than one node.
    pub centrality: Option<CentralityScores>,
}

impl AccountStats {
    /// Passed the qualification gate and was scored.
    pub fn is_qualified(&self) -> bool {
        self.influence.is_some()
    }

    pub fn influence_score(&self) -> Option<f64> {
        self.influence.as_ref().map(|s| s.total)
    }
}

/// Accounts keyed by id, iterated in insertion order.
///
/// Insertion order is the order of first appearance in the post stream, and
/// is what ranking ties fall back to.
#[derive(Debug, Clone, Default)]
pub struct AccountMap {
    accounts: Vec<AccountStats>,
    index: FxHashMap<String, usize>,
}

impl AccountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Self {
            accounts: Vec::with_capacity(capacity),
            index,
        }
    }

    /// Insert an account. Returns `false` (and keeps the existing entry) if
    /// the id is already present.
    pub fn insert(&mut self, stats: AccountStats) -> bool {
        if self.index.contains_key(&stats.account_id) {
            return false;
        }
        self.index.insert(stats.account_id.clone(), self.accounts.len());
        self.accounts.push(stats);
        true
    }

    pub fn get(&self, account_id: &str) -> Option<&AccountStats> {
        self.index.get(account_id).map(|&i| &self.accounts[i])
    }

    pub fn get_mut(&mut self, account_id: &str) -> Option<&mut AccountStats> {
        self.index.get(account_id).map(|&i| &mut self.accounts[i])
    }

    pub fn contains(&self, account_id: &str) -> bool {
        self.index.contains_key(account_id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountStats> {
        self.accounts.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.accounts.iter().map(|a| a.account_id.as_str())
    }

    /// Mutable access in insertion order. Ids must not be changed.
    pub fn as_mut_slice(&mut self) -> &mut [AccountStats] {
        &mut self.accounts
    }

    pub fn as_slice(&self) -> &[AccountStats] {
        &self.accounts
    }

    pub fn qualified(&self) -> impl Iterator<Item = &AccountStats> {
        self.accounts.iter().filter(|a| a.is_qualified())
    }

    pub fn qualified_count(&self) -> usize {
        self.qualified().count()
    }
}

impl FromIterator<AccountStats> for AccountMap {
    fn from_iter<I: IntoIterator<Item = AccountStats>>(iter: I) -> Self {
        let mut map = Self::new();
        for stats in iter {
            map.insert(stats);
        }
        map
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A measured-only account with the given activity.
    pub fn account(id: &str, posts: u64, engagement_rate: f64) -> AccountStats {
        let engagement_total = (engagement_rate * posts as f64).round() as u64;
        AccountStats {
            account_id: id.to_string(),
            display_name: format!("user_{id}"),
            post_count: posts,
            total_views: posts * 100,
            total_likes: engagement_total,
            total_retweets: 0,
            total_replies: 0,
            engagement_rate,
            reach_score: if posts > 0 { 100.0 } else { 0.0 },
            last_active_at: DateTime::from_timestamp(1_742_013_962, 0).unwrap_or_default(),
            profile: None,
            gate: None,
            influence: None,
            category: None,
            tier: None,
            centrality: None,
        }
    }

    pub fn profile(followers: u64, verified: bool) -> AccountProfile {
        AccountProfile {
            follower_count: Attribute::measured(followers),
            following_count: Attribute::measured(500),
            account_age_days: Attribute::measured(365),
            verified: Attribute::measured(verified),
        }
    }
}
