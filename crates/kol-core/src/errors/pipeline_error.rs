use crate::events::PipelineStage;

use super::ConfigError;

/// Failures surfaced by the pipeline orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Cancellation was observed before `stage` started.
    #[error("pipeline cancelled before stage `{stage}`")]
    Cancelled { stage: PipelineStage },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
