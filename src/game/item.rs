//! Pickups
//!
//! Time-limited power-up items placed on lanes during generation and
//! consumed when the player lands exactly on their tile.

use serde::{Serialize, Deserialize};

use crate::core::rng::DeterministicRng;
use crate::game::effect::EffectKind;

/// Kind of pickup item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ItemKind {
    /// Slows obstacle motion.
    Clock = 0,
    /// Grants invulnerability.
    Shield = 1,
    /// Shortens the player's step time.
    Shoe = 2,
    /// Mystery box, resolves to a concrete kind on collection.
    Random = 3,
}

impl ItemKind {
    /// Every kind the generator may place.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Clock,
        ItemKind::Shield,
        ItemKind::Shoe,
        ItemKind::Random,
    ];

    /// Kinds a mystery box can resolve to (never itself).
    pub const CONCRETE: [ItemKind; 3] = [ItemKind::Clock, ItemKind::Shield, ItemKind::Shoe];

    /// The effect this kind grants, once concrete.
    ///
    /// `Random` has no effect of its own; it must be resolved first.
    pub fn effect(self) -> Option<EffectKind> {
        match self {
            ItemKind::Clock => Some(EffectKind::SlowTime),
            ItemKind::Shield => Some(EffectKind::Invulnerable),
            ItemKind::Shoe => Some(EffectKind::SpeedBoost),
            ItemKind::Random => None,
        }
    }

    /// Resolve a mystery box at the moment of collection.
    ///
    /// Concrete kinds pass through untouched; `Random` draws uniformly
    /// from the concrete kinds so its effect is only known post-hoc.
    pub fn resolve(self, rng: &mut DeterministicRng) -> ItemKind {
        match self {
            ItemKind::Random => *rng
                .choose(&Self::CONCRETE)
                .unwrap_or(&ItemKind::Clock),
            concrete => concrete,
        }
    }
}

/// A pickup placed on a lane at generation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpawn {
    /// Tile x within the lane.
    pub x: i32,
    /// Kind as generated (may be `Random`).
    pub kind: ItemKind,
}

impl ItemSpawn {
    /// Create an item spawn.
    pub const fn new(x: i32, kind: ItemKind) -> Self {
        Self { x, kind }
    }
}
