//! Record shapes handed over by the ingestion collaborator.

pub mod types;

pub use types::{FollowEdge, PostRecord, ProfileRecord};
