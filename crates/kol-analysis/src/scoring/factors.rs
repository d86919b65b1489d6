//! 4-factor influence model: Followers, Engagement, Reach, Activity.
//!
//! Caps: followers=40, engagement=30, reach=20, activity=10 (base ≤ 100).
//! Verified accounts get ×1.2, so a score never exceeds 120, inside the
//! published [0, 132] envelope.

use super::types::ScoreBreakdown;

pub const FOLLOWER_CAP: f64 = 40.0;
pub const ENGAGEMENT_CAP: f64 = 30.0;
pub const REACH_CAP: f64 = 20.0;
pub const ACTIVITY_CAP: f64 = 10.0;

pub const FOLLOWER_SCALE: f64 = 1_000_000.0;
pub const ENGAGEMENT_SCALE: f64 = 100.0;
pub const REACH_SCALE: f64 = 10_000.0;
pub const ACTIVITY_SCALE: f64 = 1_000.0;

pub const VERIFIED_MULTIPLIER: f64 = 1.2;

/// Published upper bound of the score range.
pub const MAX_SCORE: f64 = 132.0;

/// Inputs to the model.
#[derive(Debug, Clone, Copy)]
pub struct FactorInput {
    pub follower_count: u64,
    pub engagement_rate: f64,
    pub reach_score: f64,
    pub post_count: u64,
    pub verified: bool,
}

/// Compute every component and the multiplier.
pub fn compute_breakdown(input: &FactorInput) -> ScoreBreakdown {
    let follower = follower_factor(input.follower_count);
    let engagement = engagement_factor(input.engagement_rate);
    let reach = reach_factor(input.reach_score);
    let activity = activity_factor(input.post_count);
    ScoreBreakdown {
        follower,
        engagement,
        reach,
        activity,
        base: follower + engagement + reach + activity,
        verified_multiplier: if input.verified { VERIFIED_MULTIPLIER } else { 1.0 },
    }
}

/// Final score: base × multiplier.
pub fn total(breakdown: &ScoreBreakdown) -> f64 {
    breakdown.base * breakdown.verified_multiplier
}

fn follower_factor(follower_count: u64) -> f64 {
    (follower_count as f64 / FOLLOWER_SCALE).min(1.0) * FOLLOWER_CAP
}

fn engagement_factor(engagement_rate: f64) -> f64 {
    non_negative(engagement_rate * ENGAGEMENT_SCALE).min(ENGAGEMENT_CAP)
}

fn reach_factor(reach_score: f64) -> f64 {
    non_negative(reach_score / REACH_SCALE).min(REACH_CAP)
}

fn activity_factor(post_count: u64) -> f64 {
    (post_count as f64 / ACTIVITY_SCALE).min(ACTIVITY_CAP)
}

/// Rates are derived from unsigned counts; this only guards NaN.
fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
