//! Fast hash collections used throughout the engine.
//!
//! Iteration order of these maps is unspecified. Anything that needs a
//! stable order keeps its own ordering alongside.

pub use rustc_hash::{FxHashMap, FxHashSet};
