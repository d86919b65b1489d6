//! Score → tier. Lower bounds inclusive, no hysteresis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Influence tier. `Tier1` is the most influential; the derived order sorts
/// the most desirable tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

pub const TIER1_MIN_SCORE: f64 = 80.0;
pub const TIER2_MIN_SCORE: f64 = 60.0;
pub const TIER3_MIN_SCORE: f64 = 40.0;

impl Tier {
    /// 1 (top) through 4 (junior).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
            Self::Tier4 => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1 (top)",
            Self::Tier2 => "Tier 2 (senior)",
            Self::Tier3 => "Tier 3 (mid)",
            Self::Tier4 => "Tier 4 (junior)",
        }
    }

    pub fn all() -> &'static [Tier] {
        &[Self::Tier1, Self::Tier2, Self::Tier3, Self::Tier4]
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn determine_tier(score: f64) -> Tier {
    if score >= TIER1_MIN_SCORE {
        Tier::Tier1
    } else if score >= TIER2_MIN_SCORE {
        Tier::Tier2
    } else if score >= TIER3_MIN_SCORE {
        Tier::Tier3
    } else {
        Tier::Tier4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_inclusive() {
        assert_eq!(determine_tier(80.0), Tier::Tier1);
        assert_eq!(determine_tier(79.999), Tier::Tier2);
        assert_eq!(determine_tier(60.0), Tier::Tier2);
        assert_eq!(determine_tier(40.0), Tier::Tier3);
        assert_eq!(determine_tier(39.99), Tier::Tier4);
        assert_eq!(determine_tier(0.0), Tier::Tier4);
        assert_eq!(determine_tier(132.0), Tier::Tier1);
    }

    #[test]
    fn test_order_matches_rank() {
        let mut tiers = vec![Tier::Tier3, Tier::Tier1, Tier::Tier4, Tier::Tier2];
        tiers.sort();
        assert_eq!(tiers, Tier::all());
        assert!(Tier::all().windows(2).all(|w| w[0].rank() < w[1].rank()));
    }
}
