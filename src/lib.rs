//! # Lane Hopper Engine
//!
//! Deterministic simulation engine for an endless lane-runner: a player
//! token hops across procedurally generated forest and road rows,
//! dodging looping traffic and collecting timed power-ups.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    LANE HOPPER ENGINE                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── grid.rs      - Tile coordinates and grid boundaries     │
//! │  └── rng.rs       - Deterministic Xorshift128+ PRNG          │
//! │                                                              │
//! │  game/            - Simulation logic (deterministic)         │
//! │  ├── lane.rs      - Lane rows, obstacles, vehicles           │
//! │  ├── generator.rs - Procedural row generation                │
//! │  ├── traffic.rs   - Vehicle motion and wraparound            │
//! │  ├── player.rs    - Movement queue and step state machine    │
//! │  ├── collision.rs - Player/vehicle hit testing               │
//! │  ├── item.rs      - Pickups and mystery-box resolution       │
//! │  ├── effect.rs    - Timed power-up effects                   │
//! │  ├── events.rs    - Observable state changes                 │
//! │  └── session.rs   - Session controller and tick loop         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Given the same seed and the same sequence of intents and tick
//! frames, a session produces identical maps, events, and scores:
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time dependencies; the host supplies all frame time
//! - All randomness from seeded Xorshift128+
//!
//! Rendering, input devices, audio, and persistence are host concerns;
//! the engine exposes state and events and nothing else.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::grid::{GridConfig, TileCoordinate};
pub use core::rng::DeterministicRng;
pub use game::events::{SessionEvent, SessionEventData};
pub use game::player::MovementIntent;
pub use game::session::{MapSession, RunPhase, SessionConfig, TickFrame};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
