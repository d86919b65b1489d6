//! # kol-analysis
//!
//! Influence identification engine. Aggregates posts into account stats,
//! fills unmeasured profile attributes, scores and classifies accounts,
//! analyses the follow graph, and produces a ranked report.

pub mod augment;
pub mod classify;
pub mod graph;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod stats;
pub mod timeline;

pub use pipeline::{KolPipeline, PipelineInput, PipelineOutput};
pub use report::types::Report;
