//! Game Logic Module
//!
//! All simulation code for a lane-runner session. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `lane`: Lane rows, obstacles, vehicles
//! - `generator`: Procedural row generation
//! - `traffic`: Vehicle motion and wraparound
//! - `player`: Movement queue and step state machine
//! - `collision`: Player/vehicle hit testing
//! - `item`: Pickup kinds and mystery-box resolution
//! - `effect`: Timed power-up effects
//! - `events`: Observable state changes per tick
//! - `session`: The session controller tying it together

pub mod collision;
pub mod effect;
pub mod events;
pub mod generator;
pub mod item;
pub mod lane;
pub mod player;
pub mod session;
pub mod traffic;

// Re-export key types
pub use effect::{EffectConfig, EffectKind, EffectManager};
pub use events::{SessionEvent, SessionEventData};
pub use generator::GeneratorConfig;
pub use item::ItemKind;
pub use lane::{Lane, LaneKind};
pub use player::{MovementIntent, Player, StepOutcome, StepState};
pub use session::{MapSession, RunPhase, SessionConfig, TickFrame};
