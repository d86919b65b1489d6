//! Pipeline stage identifiers and the event fan-out hosts subscribe to.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::KolEventHandler;
pub use types::PipelineStage;
