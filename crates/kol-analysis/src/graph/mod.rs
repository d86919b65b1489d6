//! Directed follow graph and its structural metrics.

pub mod builder;
pub mod centrality;
pub mod metrics;
pub mod traversal;
pub mod types;

pub use builder::{GraphBuildStats, SocialGraphBuilder};
pub use centrality::{CentralityAnalyzer, CentralityResult};
pub use types::{AveragePathLength, CentralityScores, GraphMetrics, GraphSnapshot, SocialGraph};
