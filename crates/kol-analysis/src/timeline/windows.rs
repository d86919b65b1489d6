//! ActivityTimeline — 7/30/90-day windows ending at each account's last post.

use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use kol_core::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::ingest::PostRecord;
use crate::stats::AccountMap;

/// Window lengths in days, shortest first.
pub const WINDOW_DAYS: [u32; 3] = [7, 30, 90];

/// Relative change in daily engagement needed to call a trend.
pub const TREND_THRESHOLD: f64 = 0.1;

/// Posts and engagement inside one trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityWindow {
    pub days: u32,
    pub post_count: u64,
    pub total_engagement: u64,
    /// total_engagement / max(post_count, 1).
    pub avg_engagement: f64,
}

impl ActivityWindow {
    fn empty(days: u32) -> Self {
        Self {
            days,
            post_count: 0,
            total_engagement: 0,
            avg_engagement: 0.0,
        }
    }

    fn add(&mut self, engagement: u64) {
        self.post_count = self.post_count.saturating_add(1);
        self.total_engagement = self.total_engagement.saturating_add(engagement);
    }

    fn finish(&mut self) {
        self.avg_engagement = self.total_engagement as f64 / self.post_count.max(1) as f64;
    }

    /// Engagement per calendar day of the window.
    pub fn daily_engagement(&self) -> f64 {
        self.total_engagement as f64 / f64::from(self.days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl ActivityTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }

    /// Compare the last week's daily engagement against the last month's.
    pub fn from_windows(week: &ActivityWindow, month: &ActivityWindow) -> Self {
        let baseline = month.daily_engagement();
        if baseline <= 0.0 {
            return Self::Stable;
        }
        let change = (week.daily_engagement() - baseline) / baseline;
        if change > TREND_THRESHOLD {
            Self::Increasing
        } else if change < -TREND_THRESHOLD {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

impl std::fmt::Display for ActivityTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recent activity of one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityProfile {
    pub last_active_at: DateTime<Utc>,
    /// One entry per `WINDOW_DAYS`, same order.
    pub windows: Vec<ActivityWindow>,
    pub trend: ActivityTrend,
}

impl ActivityProfile {
    pub fn window(&self, days: u32) -> Option<&ActivityWindow> {
        self.windows.iter().find(|w| w.days == days)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimelineStats {
    pub profiles: usize,
    pub posts_considered: usize,
    pub duration: Duration,
}

/// Builds activity profiles for qualified accounts.
#[derive(Debug, Default)]
pub struct ActivityTimeline;

impl ActivityTimeline {
    pub fn new() -> Self {
        Self
    }

    /// One pass over the posts. Accounts that did not qualify are skipped.
    pub fn build(
        &self,
        posts: &[PostRecord],
        accounts: &AccountMap,
    ) -> (FxHashMap<String, ActivityProfile>, TimelineStats) {
        let start = Instant::now();

        let mut windows: FxHashMap<&str, (DateTime<Utc>, [ActivityWindow; 3])> = accounts
            .qualified()
            .map(|a| {
                (
                    a.account_id.as_str(),
                    (a.last_active_at, WINDOW_DAYS.map(ActivityWindow::empty)),
                )
            })
            .collect();

        let mut posts_considered = 0;
        for post in posts {
            let Some(id) = post.identity() else { continue };
            let Some((last_active_at, slots)) = windows.get_mut(id) else {
                continue;
            };
            posts_considered += 1;
            let age = *last_active_at - post.created_at;
            for slot in slots.iter_mut() {
                if age >= TimeDelta::zero() && age <= TimeDelta::days(i64::from(slot.days)) {
                    slot.add(post.engagement());
                }
            }
        }

        let profiles: FxHashMap<String, ActivityProfile> = windows
            .into_iter()
            .map(|(id, (last_active_at, mut slots))| {
                slots.iter_mut().for_each(ActivityWindow::finish);
                let trend = ActivityTrend::from_windows(&slots[0], &slots[1]);
                (
                    id.to_string(),
                    ActivityProfile {
                        last_active_at,
                        windows: slots.to_vec(),
                        trend,
                    },
                )
            })
            .collect();

        let stats = TimelineStats {
            profiles: profiles.len(),
            posts_considered,
            duration: start.elapsed(),
        };
        tracing::info!(
            profiles = stats.profiles,
            posts = stats.posts_considered,
            elapsed_ms = stats.duration.as_millis() as u64,
            "activity timeline built"
        );
        (profiles, stats)
    }
}
