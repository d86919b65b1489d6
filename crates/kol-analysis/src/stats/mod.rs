//! Per-account activity statistics derived from posts.

pub mod aggregate;
pub mod builder;
pub mod types;

pub use builder::{AccountStatsBuilder, StatsBuildStats};
pub use types::{AccountMap, AccountProfile, AccountStats, Attribute, Provenance};

#[cfg(test)]
pub(crate) use types::test_support;
