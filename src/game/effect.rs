//! Timed Effect Manager
//!
//! Power-up effects that modulate movement and collision rules. The
//! original design fired one-shot timer callbacks; here every effect
//! carries an absolute expiry timestamp polled once per tick, which
//! makes expiry deterministic and testable without wall-clock waits.
//!
//! Expiry is measured against real elapsed time supplied by the host's
//! frame signal, so power-up duration is predictable regardless of
//! frame rate.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

/// A timed global modifier granted by a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EffectKind {
    /// Scales elapsed time fed into obstacle motion, not player stepping.
    SlowTime = 0,
    /// Shortens the player's step duration.
    SpeedBoost = 1,
    /// Collisions with vehicles are ignored while active.
    Invulnerable = 2,
}

/// Durations and modifiers for each effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    /// Slow-time duration in milliseconds.
    pub slow_time_ms: f64,
    /// Speed-boost duration in milliseconds.
    pub speed_boost_ms: f64,
    /// Invulnerability duration in milliseconds.
    pub invulnerable_ms: f64,
    /// Obstacle time multiplier while slow-time is active.
    pub time_multiplier: f32,
    /// Step duration in seconds without speed-boost.
    pub normal_step_secs: f32,
    /// Step duration in seconds under speed-boost.
    pub boosted_step_secs: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            slow_time_ms: 5000.0,
            speed_boost_ms: 7000.0,
            invulnerable_ms: 5000.0,
            time_multiplier: 0.1,
            normal_step_secs: 0.2,
            boosted_step_secs: 0.11,
        }
    }
}

impl EffectConfig {
    /// Configured duration for an effect kind, in milliseconds.
    pub fn duration_ms(&self, kind: EffectKind) -> f64 {
        match kind {
            EffectKind::SlowTime => self.slow_time_ms,
            EffectKind::SpeedBoost => self.speed_boost_ms,
            EffectKind::Invulnerable => self.invulnerable_ms,
        }
    }
}

/// Tracks the set of live effects and their expiry timestamps.
///
/// At most one timer per kind is live; re-activating a kind replaces
/// its expiry rather than stacking duration.
#[derive(Clone, Debug, Default)]
pub struct EffectManager {
    config: EffectConfig,
    // BTreeMap for deterministic iteration order
    expires_at: BTreeMap<EffectKind, f64>,
}

impl EffectManager {
    /// Create a manager with the given configuration.
    pub fn new(config: EffectConfig) -> Self {
        Self {
            config,
            expires_at: BTreeMap::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Start or restart an effect timer.
    ///
    /// Returns the duration the timer was armed with.
    pub fn activate(&mut self, kind: EffectKind, now_ms: f64) -> f64 {
        let duration = self.config.duration_ms(kind);
        // Replace semantics: a second pickup resets the clock
        self.expires_at.insert(kind, now_ms + duration);
        duration
    }

    /// Drop every effect whose timestamp has passed.
    ///
    /// Polled once per tick before any system reads modifiers.
    pub fn expire(&mut self, now_ms: f64) {
        self.expires_at.retain(|_, expiry| *expiry > now_ms);
    }

    /// Whether an effect is currently live.
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.expires_at.contains_key(&kind)
    }

    /// Remaining time for a live effect, for UI countdown rendering.
    pub fn remaining_ms(&self, kind: EffectKind, now_ms: f64) -> Option<f64> {
        self.expires_at
            .get(&kind)
            .map(|expiry| (expiry - now_ms).max(0.0))
    }

    /// Multiplier applied to elapsed time fed into obstacle motion.
    pub fn time_scale(&self) -> f32 {
        if self.is_active(EffectKind::SlowTime) {
            self.config.time_multiplier
        } else {
            1.0
        }
    }

    /// Current player step duration in seconds.
    pub fn step_duration(&self) -> f32 {
        if self.is_active(EffectKind::SpeedBoost) {
            self.config.boosted_step_secs
        } else {
            self.config.normal_step_secs
        }
    }

    /// Cancel all pending expiries (run restart).
    pub fn clear(&mut self) {
        self.expires_at.clear();
    }

    /// Number of live effects.
    pub fn active_count(&self) -> usize {
        self.expires_at.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> EffectManager {
        EffectManager::new(EffectConfig::default())
    }

    #[test]
    fn test_activate_and_expire() {
        let mut effects = manager();
        effects.activate(EffectKind::SlowTime, 0.0);

        assert!(effects.is_active(EffectKind::SlowTime));
        assert_eq!(effects.time_scale(), 0.1);

        effects.expire(4999.0);
        assert!(effects.is_active(EffectKind::SlowTime));

        effects.expire(5000.0);
        assert!(!effects.is_active(EffectKind::SlowTime));
        assert_eq!(effects.time_scale(), 1.0);
    }

    #[test]
    fn test_replace_not_stack() {
        let mut effects = manager();

        // Boost at t=0 for 7000ms, picked up again at t=1000
        effects.activate(EffectKind::SpeedBoost, 0.0);
        effects.activate(EffectKind::SpeedBoost, 1000.0);

        // Single timer, expiring 7000ms after the second pickup
        assert_eq!(effects.active_count(), 1);
        assert_eq!(effects.remaining_ms(EffectKind::SpeedBoost, 1000.0), Some(7000.0));

        effects.expire(7999.0);
        assert!(effects.is_active(EffectKind::SpeedBoost));
        effects.expire(8000.0);
        assert!(!effects.is_active(EffectKind::SpeedBoost));
    }

    #[test]
    fn test_step_duration_modifier() {
        let mut effects = manager();
        assert_eq!(effects.step_duration(), 0.2);

        effects.activate(EffectKind::SpeedBoost, 0.0);
        assert_eq!(effects.step_duration(), 0.11);

        effects.expire(7000.0);
        assert_eq!(effects.step_duration(), 0.2);
    }

    #[test]
    fn test_effects_compose() {
        // Slow-motion on obstacles while the player is boosted and shielded
        let mut effects = manager();
        effects.activate(EffectKind::SlowTime, 0.0);
        effects.activate(EffectKind::SpeedBoost, 0.0);
        effects.activate(EffectKind::Invulnerable, 0.0);

        assert_eq!(effects.time_scale(), 0.1);
        assert_eq!(effects.step_duration(), 0.11);
        assert!(effects.is_active(EffectKind::Invulnerable));

        // Boost outlives the 5000ms effects
        effects.expire(5000.0);
        assert!(effects.is_active(EffectKind::SpeedBoost));
        assert!(!effects.is_active(EffectKind::SlowTime));
        assert!(!effects.is_active(EffectKind::Invulnerable));
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut effects = manager();
        effects.activate(EffectKind::SlowTime, 0.0);
        effects.activate(EffectKind::Invulnerable, 0.0);

        effects.clear();
        assert_eq!(effects.active_count(), 0);
        assert!(effects.remaining_ms(EffectKind::SlowTime, 0.0).is_none());
    }

    #[test]
    fn test_remaining_never_negative() {
        let mut effects = manager();
        effects.activate(EffectKind::Invulnerable, 0.0);

        // Expiry not yet polled; remaining clamps at zero
        assert_eq!(effects.remaining_ms(EffectKind::Invulnerable, 9000.0), Some(0.0));
    }
}
