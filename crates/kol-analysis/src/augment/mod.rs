//! Fills unmeasured profile attributes with tagged, seeded synthetic values.

pub mod synthesizer;

pub use synthesizer::{AugmentStats, StatAugmenter, SynthesisRanges};
