use std::time::Duration;

use super::types::PipelineStage;

/// Observer for pipeline progress. Every method defaults to a no-op.
///
/// Handlers are called synchronously on the pipeline thread, between stages.
pub trait KolEventHandler: Send + Sync {
    fn on_stage_started(&self, _stage: PipelineStage) {}

    fn on_stage_completed(&self, _stage: PipelineStage, _elapsed: Duration) {}

    /// Records dropped by a stage (malformed posts, dangling edges, ...).
    fn on_records_dropped(&self, _stage: PipelineStage, _count: usize) {}
}
