//! Post, follow-edge, and profile records.
//!
//! Type validity is enforced upstream. The engine only checks that identity
//! fields are present and drops (and counts) records where they are not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub account_id: Option<String>,
    pub display_name: Option<String>,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub retweets: u64,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub views: u64,
}

impl PostRecord {
    /// The account id, if the record carries a usable one and has text.
    pub fn identity(&self) -> Option<&str> {
        let id = self.account_id.as_deref()?.trim();
        if id.is_empty() || self.text.is_none() {
            return None;
        }
        Some(id)
    }

    /// likes + retweets + replies, saturating at `u64::MAX`.
    pub fn engagement(&self) -> u64 {
        self.likes.saturating_add(self.retweets).saturating_add(self.replies)
    }
}

/// `follower_id` follows `followee_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower_id: String,
    pub followee_id: String,
}

impl FollowEdge {
    pub fn new(follower_id: impl Into<String>, followee_id: impl Into<String>) -> Self {
        Self {
            follower_id: follower_id.into(),
            followee_id: followee_id.into(),
        }
    }

    /// Trimmed `(follower, followee)` ids, the same normalisation posts get.
    /// `None` if either is blank.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let follower = self.follower_id.trim();
        let followee = self.followee_id.trim();
        if follower.is_empty() || followee.is_empty() {
            return None;
        }
        Some((follower, followee))
    }

    /// An edge with a blank endpoint cannot be matched to any account.
    pub fn is_malformed(&self) -> bool {
        self.endpoints().is_none()
    }
}

/// Measured profile attributes for one account. Any field may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub account_id: String,
    pub follower_count: Option<u64>,
    pub following_count: Option<u64>,
    pub account_age_days: Option<u32>,
    pub verified: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: Option<&str>, text: Option<&str>) -> PostRecord {
        PostRecord {
            account_id: id.map(str::to_string),
            display_name: None,
            text: text.map(str::to_string),
            created_at: DateTime::from_timestamp(1_742_013_962, 0).unwrap(),
            likes: 1,
            retweets: 2,
            replies: 3,
            views: 10,
        }
    }

    #[test]
    fn test_identity_requires_id_and_text() {
        assert_eq!(post(Some("42"), Some("gm")).identity(), Some("42"));
        assert_eq!(post(None, Some("gm")).identity(), None);
        assert_eq!(post(Some("  "), Some("gm")).identity(), None);
        assert_eq!(post(Some("42"), None).identity(), None);
    }

    #[test]
    fn test_empty_text_is_still_valid() {
        assert_eq!(post(Some("7"), Some("")).identity(), Some("7"));
    }

    #[test]
    fn test_engagement_sum() {
        assert_eq!(post(Some("1"), Some("x")).engagement(), 6);
    }

    #[test]
    fn test_malformed_edge() {
        assert!(FollowEdge::new("", "b").is_malformed());
        assert!(!FollowEdge::new("a", "b").is_malformed());
        assert!(FollowEdge::new(" a ", "\t").is_malformed());
    }

    #[test]
    fn test_edge_endpoints_trimmed() {
        assert_eq!(FollowEdge::new(" a", "b\n").endpoints(), Some(("a", "b")));
        assert_eq!(FollowEdge::new("a", " ").endpoints(), None);
    }

    #[test]
    fn test_engagement_saturates() {
        let mut p = post(Some("1"), Some("x"));
        p.likes = u64::MAX - 1;
        assert_eq!(p.engagement(), u64::MAX);
    }
}
