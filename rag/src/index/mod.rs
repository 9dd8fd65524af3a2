//! Vector index for nearest-neighbor retrieval.
//!
//! This module provides [`FlatIndex`], a flat (exhaustive) L2 index: every
//! query is scored against every stored vector with exact Euclidean
//! distance. No approximation, no training step.

mod flat;

pub use flat::FlatIndex;
