//! Session Events
//!
//! Every externally observable state change surfaces as an event record.
//! The session buffers them per tick; the host drains the buffer with
//! `take_events` and fans them out to UI, scoring, and audio layers.

use serde::{Serialize, Deserialize};

use crate::game::effect::EffectKind;
use crate::game::item::ItemKind;
use crate::game::player::MovementIntent;

/// A state change produced during one simulation tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Tick the change happened on.
    pub tick: u64,
    /// What changed.
    pub data: SessionEventData,
}

/// Payload of a session event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEventData {
    /// The player reached a new deepest row; the score is that depth.
    ScoreAdvanced {
        /// New maximum depth.
        depth: i32,
    },
    /// A pickup was collected, already resolved to a concrete kind.
    ItemCollected {
        /// Concrete kind the pickup resolved to.
        kind: ItemKind,
    },
    /// An effect timer was started or restarted.
    EffectActivated {
        /// Effect kind.
        kind: EffectKind,
        /// Duration the timer was armed with, in milliseconds.
        duration_ms: f64,
    },
    /// A queued move targeted an invalid tile and was discarded.
    MoveRejected {
        /// The discarded intent.
        intent: MovementIntent,
    },
    /// A vehicle hit ended the run.
    RunEnded {
        /// Score at the moment of the hit.
        final_score: i32,
    },
    /// The session was reset into a fresh run.
    Restarted {
        /// Run counter after the reset.
        run: u32,
    },
    /// New rows were generated ahead of the player.
    LanesExtended {
        /// First newly generated row.
        from_row: i32,
        /// Number of rows added.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tags() {
        let event = SessionEvent {
            tick: 42,
            data: SessionEventData::ScoreAdvanced { depth: 7 },
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"score_advanced\""));
        assert!(json.contains("\"depth\":7"));

        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_run_ended_roundtrip() {
        let event = SessionEvent {
            tick: 1000,
            data: SessionEventData::RunEnded { final_score: 31 },
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
