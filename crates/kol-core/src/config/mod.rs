//! Engine configuration.

pub mod kol_config;

pub use kol_config::KolConfig;
