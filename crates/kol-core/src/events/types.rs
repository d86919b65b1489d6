use std::fmt;

use serde::{Deserialize, Serialize};

/// The sequential stages of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Stats,
    Augment,
    Score,
    Graph,
    Centrality,
    Timeline,
    Report,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Augment => "augment",
            Self::Score => "score",
            Self::Graph => "graph",
            Self::Centrality => "centrality",
            Self::Timeline => "timeline",
            Self::Report => "report",
        }
    }

    pub fn all() -> &'static [PipelineStage] {
        &[
            Self::Stats,
            Self::Augment,
            Self::Score,
            Self::Graph,
            Self::Centrality,
            Self::Timeline,
            Self::Report,
        ]
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
