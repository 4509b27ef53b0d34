//! Session Controller
//!
//! Owns the full simulation state for one player session and drives it
//! through fixed-order ticks. Each tick: expire effect timers, move
//! vehicles, advance the player state machine, test collision, collect
//! pickups, then extend the map frontier. The host supplies frame time;
//! the engine never reads a wall clock of its own.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::grid::GridConfig;
use crate::core::rng::{derive_run_seed, DeterministicRng};
use crate::game::collision::vehicle_hit;
use crate::game::effect::{EffectConfig, EffectKind, EffectManager};
use crate::game::events::{SessionEvent, SessionEventData};
use crate::game::generator::{generate_lanes, GeneratorConfig};
use crate::game::lane::{Lane, LaneError};
use crate::game::player::{ends_up_valid, MovementIntent, Player, StepOutcome};
use crate::game::traffic::advance_all;

/// Everything tunable about a session, bundled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Grid boundaries.
    pub grid: GridConfig,
    /// Lane generation tunables.
    pub generator: GeneratorConfig,
    /// Effect durations and modifiers.
    pub effects: EffectConfig,
    /// Rows generated per extension batch.
    pub batch_size: usize,
    /// Generate another batch once fewer than this many rows remain
    /// ahead of the player's deepest position.
    pub extend_threshold: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            generator: GeneratorConfig::default(),
            effects: EffectConfig::default(),
            batch_size: 10,
            extend_threshold: 12,
        }
    }
}

/// Whether the run is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Ticks simulate; input is accepted.
    Running,
    /// A vehicle hit ended the run; only `restart` leaves this phase.
    Ended,
}

/// One frame of host-supplied time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickFrame {
    /// Simulation time step in seconds.
    pub dt: f32,
    /// Absolute session clock in milliseconds.
    pub now_ms: f64,
}

/// Externally supplied session state that failed validation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A prebuilt lane is malformed.
    #[error("lane at row {row} is invalid")]
    InvalidLane {
        /// Row index of the offending lane (1-based, like the map).
        row: i32,
        /// What was wrong with it.
        #[source]
        source: LaneError,
    },
}

/// A live simulation session: map, player, effects, and event buffer.
pub struct MapSession {
    id: Uuid,
    seed: u64,
    run: u32,
    config: SessionConfig,
    rng: DeterministicRng,
    lanes: Vec<Lane>,
    player: Player,
    effects: EffectManager,
    phase: RunPhase,
    tick: u64,
    pending_events: Vec<SessionEvent>,
}

impl MapSession {
    /// Create a session and generate its opening map batch.
    pub fn new(seed: u64, config: SessionConfig) -> Self {
        let mut rng = DeterministicRng::new(derive_run_seed(seed, 0));
        let lanes = generate_lanes(
            &mut rng,
            &config.grid,
            &config.generator,
            1,
            config.batch_size,
        );

        let session = Self {
            id: Uuid::new_v4(),
            seed,
            run: 0,
            config,
            rng,
            lanes,
            player: Player::new(),
            effects: EffectManager::new(config.effects),
            phase: RunPhase::Running,
            tick: 0,
            pending_events: Vec::new(),
        };

        info!(session_id = %session.id, seed, "session created");
        session
    }

    /// Create a session over prebuilt rows instead of generated ones.
    ///
    /// Used by scripted openings and tests; every row must pass lane
    /// validation against the session's grid.
    pub fn from_rows(
        seed: u64,
        config: SessionConfig,
        rows: Vec<Lane>,
    ) -> Result<Self, SessionError> {
        for (i, row) in rows.iter().enumerate() {
            row.validate(&config.grid).map_err(|source| SessionError::InvalidLane {
                row: i as i32 + 1,
                source,
            })?;
        }

        let mut session = Self::new(seed, config);
        session.lanes = rows;
        Ok(session)
    }

    /// Session identity.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current run counter, starting at zero.
    pub fn run(&self) -> u32 {
        self.run
    }

    /// Whether the run is live or over.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Ticks simulated since the last restart.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Current score: the deepest row reached this run.
    pub fn score(&self) -> i32 {
        self.player.max_depth()
    }

    /// The player token.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The effect manager, for UI countdown queries.
    pub fn effects(&self) -> &EffectManager {
        &self.effects
    }

    /// Number of generated rows.
    pub fn row_count(&self) -> usize {
        self.lanes.len()
    }

    /// The lane at row `z`, if that row has been generated.
    ///
    /// Rows start at `z = 1`; the safe zone (`z <= 0`) has no lane.
    pub fn lane(&self, z: i32) -> Option<&Lane> {
        if z >= 1 {
            self.lanes.get((z - 1) as usize)
        } else {
            None
        }
    }

    /// Queue a directional move for the player.
    ///
    /// Ignored once the run has ended.
    pub fn queue_intent(&mut self, intent: MovementIntent) {
        if self.phase == RunPhase::Running {
            self.player.queue_intent(intent);
        }
    }

    /// Drain the events buffered since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Simulate one tick.
    ///
    /// A no-op once the run has ended; state freezes at the moment of
    /// the fatal hit until `restart`.
    pub fn tick(&mut self, frame: TickFrame) {
        if self.phase == RunPhase::Ended {
            return;
        }
        self.tick += 1;

        // 1. Expiry first, so this tick's modifiers are current
        self.effects.expire(frame.now_ms);

        // 2. Vehicles, under the slow-time scale
        advance_all(
            &mut self.lanes,
            &self.config.grid,
            frame.dt,
            self.effects.time_scale(),
        );

        // 3. Player stepping, under the boost step duration
        let outcome = {
            let grid = &self.config.grid;
            let lanes = &self.lanes;
            self.player.advance(frame.dt, self.effects.step_duration(), |tile| {
                ends_up_valid(tile, grid, lanes)
            })
        };

        let mut committed_tile = None;
        match outcome {
            StepOutcome::None => {}
            StepOutcome::Rejected(intent) => {
                self.push_event(SessionEventData::MoveRejected { intent });
            }
            StepOutcome::Committed { tile, new_depth } => {
                if let Some(depth) = new_depth {
                    self.push_event(SessionEventData::ScoreAdvanced { depth });
                }
                committed_tile = Some(tile);
            }
        }

        // 4. Collision on the row the player last committed to. This
        // runs before pickup collection: landing on a pickup tile while
        // overlapping a vehicle is a fatal hit, not a rescue.
        if self.check_fatal_hit() {
            self.end_run();
            return;
        }

        // 5. Pickup on the freshly committed tile
        if let Some(tile) = committed_tile {
            self.collect_item_at(tile.x, tile.z, frame.now_ms);
        }

        // 6. Keep the frontier comfortably ahead of the player
        self.extend_frontier();
    }

    /// Reset into a fresh run: new map, new RNG stream, same session.
    pub fn restart(&mut self) {
        self.run += 1;
        self.rng = DeterministicRng::new(derive_run_seed(self.seed, self.run));
        self.lanes = generate_lanes(
            &mut self.rng,
            &self.config.grid,
            &self.config.generator,
            1,
            self.config.batch_size,
        );
        self.player = Player::new();
        self.effects.clear();
        self.phase = RunPhase::Running;
        self.tick = 0;

        info!(session_id = %self.id, run = self.run, "run restarted");
        self.push_event(SessionEventData::Restarted { run: self.run });
    }

    fn check_fatal_hit(&self) -> bool {
        if self.effects.is_active(EffectKind::Invulnerable) {
            return false;
        }
        let Some(lane) = self.lane(self.player.tile().z) else {
            return false;
        };
        let (player_x, _) = self.player.world_position();
        vehicle_hit(lane, player_x)
    }

    fn end_run(&mut self) {
        let final_score = self.score();
        self.phase = RunPhase::Ended;
        info!(session_id = %self.id, run = self.run, final_score, "run ended");
        self.push_event(SessionEventData::RunEnded { final_score });
    }

    fn collect_item_at(&mut self, x: i32, z: i32, now_ms: f64) {
        if z < 1 {
            return;
        }
        let Some(lane) = self.lanes.get_mut((z - 1) as usize) else {
            return;
        };
        let Some(spawn) = lane.take_item_at(x) else {
            return;
        };

        // Mystery boxes resolve at collection time, from the same stream
        // that generated the map
        let kind = spawn.kind.resolve(&mut self.rng);
        debug!(session_id = %self.id, ?kind, x, z, "item collected");
        self.push_event(SessionEventData::ItemCollected { kind });

        if let Some(effect) = kind.effect() {
            let duration_ms = self.effects.activate(effect, now_ms);
            self.push_event(SessionEventData::EffectActivated {
                kind: effect,
                duration_ms,
            });
        }
    }

    fn extend_frontier(&mut self) {
        while (self.lanes.len() as i32) - self.player.max_depth() < self.config.extend_threshold {
            let start_row = self.lanes.len() as i32 + 1;
            let batch = generate_lanes(
                &mut self.rng,
                &self.config.grid,
                &self.config.generator,
                start_row,
                self.config.batch_size,
            );
            debug!(
                session_id = %self.id,
                from_row = start_row,
                count = batch.len(),
                "frontier extended"
            );
            self.push_event(SessionEventData::LanesExtended {
                from_row: start_row,
                count: batch.len(),
            });
            self.lanes.extend(batch);
        }
    }

    fn push_event(&mut self, data: SessionEventData) {
        self.pending_events.push(SessionEvent {
            tick: self.tick,
            data,
        });
    }
}
