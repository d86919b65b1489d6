//! # kol-core
//!
//! Shared foundation for the KOL influence engine.
//! Configuration, error types, pipeline stages and events,
//! cancellation, tracing setup, and collection aliases.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod traits;
pub mod tracing;
pub mod types;

pub use config::KolConfig;
pub use errors::{ConfigError, PipelineError};
pub use events::{EventDispatcher, KolEventHandler, PipelineStage};
pub use traits::CancellationToken;
