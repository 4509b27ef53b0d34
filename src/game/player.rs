//! Player Movement State Machine
//!
//! Consumes queued directional intents one at a time, validates the
//! destination tile, and animates discrete step transitions. Intents
//! arriving while a step is in flight wait in FIFO order; there is no
//! coalescing, no priority, and no cancellation short of a run restart.

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Serialize, Deserialize};

use crate::core::grid::{GridConfig, TileCoordinate};
use crate::game::lane::Lane;

/// A resolved directional move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementIntent {
    /// One row deeper (+z).
    Forward,
    /// One row back (-z).
    Backward,
    /// One tile toward negative x.
    Left,
    /// One tile toward positive x.
    Right,
}

impl MovementIntent {
    /// Tile delta for this intent.
    pub fn delta(self) -> (i32, i32) {
        match self {
            MovementIntent::Forward => (0, 1),
            MovementIntent::Backward => (0, -1),
            MovementIntent::Left => (-1, 0),
            MovementIntent::Right => (1, 0),
        }
    }

    /// Facing angle in radians for the rendering collaborator.
    pub fn facing_angle(self) -> f32 {
        match self {
            MovementIntent::Forward => PI,
            MovementIntent::Backward => 0.0,
            MovementIntent::Left => -FRAC_PI_2,
            MovementIntent::Right => FRAC_PI_2,
        }
    }
}

/// Current animation state of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepState {
    /// Standing on a tile, ready to consume the next intent.
    Idle,
    /// Mid-step between two tiles.
    Stepping {
        /// Tile the step started from.
        from: TileCoordinate,
        /// Destination tile.
        to: TileCoordinate,
        /// Normalized progress in `[0, 1)`.
        progress: f32,
    },
}

/// Result of advancing the state machine by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// Nothing happened this frame.
    None,
    /// The front intent targeted an invalid tile and was discarded.
    Rejected(MovementIntent),
    /// A step finished and the player committed to its tile.
    Committed {
        /// The freshly committed tile.
        tile: TileCoordinate,
        /// Set when the commit increased the maximum depth.
        new_depth: Option<i32>,
    },
}

/// The player token and its movement queue.
#[derive(Clone, Debug)]
pub struct Player {
    tile: TileCoordinate,
    state: StepState,
    intents: VecDeque<MovementIntent>,
    max_depth: i32,
    facing: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Create a player standing idle at the spawn tile.
    pub fn new() -> Self {
        Self {
            tile: TileCoordinate::ORIGIN,
            state: StepState::Idle,
            intents: VecDeque::new(),
            max_depth: 0,
            facing: MovementIntent::Forward.facing_angle(),
        }
    }

    /// The tile the player last committed to.
    pub fn tile(&self) -> TileCoordinate {
        self.tile
    }

    /// Current animation state.
    pub fn state(&self) -> StepState {
        self.state
    }

    /// Deepest row reached this run; this is the score.
    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    /// Facing angle in radians, tracking the last processed intent.
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Number of queued intents (including one mid-step).
    pub fn queued_intents(&self) -> usize {
        self.intents.len()
    }

    /// Enqueue a directional intent verbatim.
    pub fn queue_intent(&mut self, intent: MovementIntent) {
        self.intents.push_back(intent);
    }

    /// Drop every queued intent (run restart).
    pub fn clear_intents(&mut self) {
        self.intents.clear();
    }

    /// Interpolated world position `(x, z)` for rendering and collision.
    ///
    /// The camera and lighting collaborators bind to this transform;
    /// the engine itself never holds them.
    pub fn world_position(&self) -> (f32, f32) {
        match self.state {
            StepState::Idle => (self.tile.x as f32, self.tile.z as f32),
            StepState::Stepping { from, to, progress } => {
                let fx = from.x as f32;
                let fz = from.z as f32;
                (
                    fx + (to.x as f32 - fx) * progress,
                    fz + (to.z as f32 - fz) * progress,
                )
            }
        }
    }

    /// Advance the state machine by one frame.
    ///
    /// `step_duration` is the effect-scaled step time in seconds, read
    /// fresh each frame so a boost picked up mid-step shortens the
    /// remainder. `is_valid` judges the destination tile.
    ///
    /// At most one intent is acted on per call.
    pub fn advance<F>(&mut self, dt: f32, step_duration: f32, is_valid: F) -> StepOutcome
    where
        F: Fn(TileCoordinate) -> bool,
    {
        if let StepState::Idle = self.state {
            let Some(&intent) = self.intents.front() else {
                return StepOutcome::None;
            };

            self.facing = intent.facing_angle();

            let (dx, dz) = intent.delta();
            let target = self.tile.offset(dx, dz);
            if !is_valid(target) {
                // Discard; the rejection animation is the renderer's job
                self.intents.pop_front();
                return StepOutcome::Rejected(intent);
            }

            self.state = StepState::Stepping {
                from: self.tile,
                to: target,
                progress: 0.0,
            };
        }

        if let StepState::Stepping { from, to, progress } = self.state {
            let progress = progress + dt / step_duration.max(f32::EPSILON);
            if progress >= 1.0 {
                return self.commit(to);
            }
            self.state = StepState::Stepping { from, to, progress };
        }

        StepOutcome::None
    }

    fn commit(&mut self, target: TileCoordinate) -> StepOutcome {
        self.tile = target;
        self.state = StepState::Idle;
        // The intent is consumed only once its step lands
        self.intents.pop_front();

        let new_depth = if target.z > self.max_depth {
            self.max_depth = target.z;
            Some(target.z)
        } else {
            None
        };

        StepOutcome::Committed { tile: target, new_depth }
    }
}

/// Whether a target tile is a legal destination.
///
/// Out-of-range x, rows behind the safe-start boundary, and forest
/// obstacles reject the move. Road vehicles are deliberately ignored:
/// they move, so runtime collision owns them.
pub fn ends_up_valid(target: TileCoordinate, grid: &GridConfig, lanes: &[Lane]) -> bool {
    if !grid.contains_x(target.x) {
        return false;
    }
    if target.z < grid.rear_boundary() {
        return false;
    }

    // Rows z >= 1 map onto the generated lane list; the safe prefix and
    // any not-yet-generated frontier row are open ground.
    if target.z >= 1 {
        if let Some(lane) = lanes.get((target.z - 1) as usize) {
            if lane.blocks(target.x) {
                return false;
            }
        }
    }

    true
}
