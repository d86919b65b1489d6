//! Ranked report over the scored accounts.

pub mod generator;
pub mod types;

pub use generator::{ReportContext, ReportGenerator};
pub use types::{RankedAccount, Report, ReportSummary, RunMetadata, ScoreStatistics};
