//! Activity timeline — recent posting windows and engagement trend.

pub mod windows;

pub use windows::{ActivityProfile, ActivityTimeline, ActivityTrend, ActivityWindow, TimelineStats};
