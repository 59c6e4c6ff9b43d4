//! Core deterministic primitives.
//!
//! Randomness lives here so the game modules never touch a global source.

pub mod rng;

// Re-export core types
pub use rng::{DeterministicRng, RandomSource, derive_action_seed};
