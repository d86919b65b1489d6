//! Engine-wide defaults and formula constants.

/// Minimum follower count for an account to qualify as a KOL.
pub const DEFAULT_MIN_FOLLOWERS: u64 = 10_000;

/// Minimum engagement per post for an account to qualify.
pub const DEFAULT_MIN_ENGAGEMENT: f64 = 0.1;

/// Minimum number of posts for an account to qualify.
pub const DEFAULT_MIN_POST_COUNT: u64 = 10;

/// Distinct accounts processed per run. 0 disables the cap.
pub const DEFAULT_ACCOUNT_LIMIT: usize = 100;

/// Length of the headline ranking.
pub const DEFAULT_TOP_N: usize = 20;

/// Post records aggregated per batch.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "KOL_LOG";

/// Config file name looked up by `KolConfig::load_from_dir`.
pub const CONFIG_FILE_NAME: &str = "kol.toml";
