//! Error types for the KOL engine.
//!
//! Degenerate inputs (malformed records, dangling edges, tiny graphs, empty
//! qualified sets) are not errors; stages count them and carry on.

pub mod config_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use pipeline_error::PipelineError;
