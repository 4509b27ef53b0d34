//! Core deterministic primitives.
//!
//! The coordinate model and the seeded RNG that all procedural
//! generation draws from.

pub mod grid;
pub mod rng;

// Re-export core types
pub use grid::{TileCoordinate, GridConfig};
pub use rng::{DeterministicRng, derive_run_seed};
