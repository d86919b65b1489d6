//! `KolConfig` — every tunable the engine recognises, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_ACCOUNT_LIMIT, DEFAULT_BATCH_SIZE, DEFAULT_MIN_ENGAGEMENT,
    DEFAULT_MIN_FOLLOWERS, DEFAULT_MIN_POST_COUNT, DEFAULT_TOP_N,
};
use crate::errors::ConfigError;

/// Engine configuration. Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KolConfig {
    /// Qualification gate: minimum follower count.
    pub min_followers: u64,
    /// Qualification gate: minimum engagement per post.
    pub min_engagement: f64,
    /// Qualification gate: minimum post count.
    pub min_post_count: u64,
    /// Distinct accounts kept, in order of first appearance. 0 = unlimited.
    pub account_limit: usize,
    /// Entries in the headline ranking.
    pub top_n: usize,
    /// Post records aggregated per batch.
    pub batch_size: usize,
    /// Seed for synthesized profile attributes. `None` draws a fresh seed.
    pub random_seed: Option<u64>,
}

impl Default for KolConfig {
    fn default() -> Self {
        Self {
            min_followers: DEFAULT_MIN_FOLLOWERS,
            min_engagement: DEFAULT_MIN_ENGAGEMENT,
            min_post_count: DEFAULT_MIN_POST_COUNT,
            account_limit: DEFAULT_ACCOUNT_LIMIT,
            top_n: DEFAULT_TOP_N,
            batch_size: DEFAULT_BATCH_SIZE,
            random_seed: None,
        }
    }
}

impl KolConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Load `kol.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    /// Reject values no stage can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_size",
                message: "must be at least 1".to_string(),
            });
        }
        if !self.min_engagement.is_finite() || self.min_engagement < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "min_engagement",
                message: format!("must be a finite, non-negative number (got {})", self.min_engagement),
            });
        }
        Ok(())
    }

    /// The account cap as an `Option`, with 0 meaning unlimited.
    pub fn effective_account_limit(&self) -> Option<usize> {
        (self.account_limit > 0).then_some(self.account_limit)
    }
}
