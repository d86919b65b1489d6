//! Shared traits and primitives used across KOL crates.

pub mod cancellation;

pub use cancellation::CancellationToken;
