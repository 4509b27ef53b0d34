//! Lane Definitions
//!
//! One generated row of the grid: forest lanes with static obstacles or
//! road lanes with moving vehicles, both optionally carrying pickups.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::grid::GridConfig;
use crate::game::item::ItemSpawn;

/// Visual variant of a static forest obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObstacleKind {
    /// First tree model.
    Tree01 = 0,
    /// Second tree model.
    Tree02 = 1,
    /// Third tree model.
    Tree03 = 2,
    /// Fourth tree model.
    Tree04 = 3,
}

impl ObstacleKind {
    /// Number of obstacle variants.
    pub const COUNT: u32 = 4;

    /// Variant from a generation index.
    pub fn from_index(index: u32) -> ObstacleKind {
        match index % Self::COUNT {
            0 => ObstacleKind::Tree01,
            1 => ObstacleKind::Tree02,
            2 => ObstacleKind::Tree03,
            _ => ObstacleKind::Tree04,
        }
    }
}

/// Visual variant of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum VehicleKind {
    Car01 = 0,
    Car02 = 1,
    Car03 = 2,
    Car04 = 3,
    Car05 = 4,
    Car06 = 5,
    Car07 = 6,
    Car08 = 7,
}

impl VehicleKind {
    /// Number of vehicle variants.
    pub const COUNT: u32 = 8;

    /// Variant from a generation index.
    pub fn from_index(index: u32) -> VehicleKind {
        match index % Self::COUNT {
            0 => VehicleKind::Car01,
            1 => VehicleKind::Car02,
            2 => VehicleKind::Car03,
            3 => VehicleKind::Car04,
            4 => VehicleKind::Car05,
            5 => VehicleKind::Car06,
            6 => VehicleKind::Car07,
            _ => VehicleKind::Car08,
        }
    }
}

/// Travel direction of a road lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
}

impl Direction {
    /// Signed unit factor for motion along x.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A static obstacle on a forest lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Tile x within the lane.
    pub x: i32,
    /// Visual variant.
    pub kind: ObstacleKind,
}

/// A moving vehicle on a road lane.
///
/// Owned exclusively by its lane; discarded with it on reset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Tile x the vehicle was placed at during generation.
    pub initial_x: i32,
    /// Visual variant.
    pub kind: VehicleKind,
    /// Runtime position along x, in tile units.
    pub x: f32,
}

impl Vehicle {
    /// Create a vehicle at its initial tile.
    pub fn new(initial_x: i32, kind: VehicleKind) -> Self {
        Self {
            initial_x,
            kind,
            x: initial_x as f32,
        }
    }
}

/// Lane-type-specific contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LaneKind {
    /// Static obstacles, checked at move-validation time.
    Forest {
        /// Trees blocking tiles of this row.
        obstacles: Vec<Obstacle>,
    },
    /// Moving vehicles, checked by runtime collision.
    Road {
        /// Travel direction shared by all vehicles in the lane.
        direction: Direction,
        /// Base speed in tiles per second.
        speed: f32,
        /// Vehicles looping over the road range.
        vehicles: Vec<Vehicle>,
    },
}

/// One generated row of the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Forest or road contents.
    pub kind: LaneKind,
    /// Pickups placed on this row. Emptied as the player collects them.
    pub items: Vec<ItemSpawn>,
}

impl Lane {
    /// Create a forest lane.
    pub fn forest(obstacles: Vec<Obstacle>, items: Vec<ItemSpawn>) -> Self {
        Self {
            kind: LaneKind::Forest { obstacles },
            items,
        }
    }

    /// Create a road lane.
    pub fn road(direction: Direction, speed: f32, vehicles: Vec<Vehicle>, items: Vec<ItemSpawn>) -> Self {
        Self {
            kind: LaneKind::Road {
                direction,
                speed,
                vehicles,
            },
            items,
        }
    }

    /// Whether this is a road lane.
    pub fn is_road(&self) -> bool {
        matches!(self.kind, LaneKind::Road { .. })
    }

    /// Whether a forest obstacle blocks the given x.
    ///
    /// Road vehicles never block here; they move and are handled by
    /// runtime collision instead.
    pub fn blocks(&self, x: i32) -> bool {
        match &self.kind {
            LaneKind::Forest { obstacles } => obstacles.iter().any(|o| o.x == x),
            LaneKind::Road { .. } => false,
        }
    }

    /// Every x occupied by an obstacle or vehicle at generation time.
    pub fn occupied_xs(&self) -> Vec<i32> {
        match &self.kind {
            LaneKind::Forest { obstacles } => obstacles.iter().map(|o| o.x).collect(),
            LaneKind::Road { vehicles, .. } => vehicles.iter().map(|v| v.initial_x).collect(),
        }
    }

    /// Remove and return the item at the given x, if any.
    pub fn take_item_at(&mut self, x: i32) -> Option<ItemSpawn> {
        let idx = self.items.iter().position(|item| item.x == x)?;
        Some(self.items.remove(idx))
    }

    /// Validate externally supplied lane data against the grid.
    ///
    /// Generated lanes satisfy this by construction; prebuilt opening
    /// scripts go through here before a session accepts them.
    pub fn validate(&self, grid: &GridConfig) -> Result<(), LaneError> {
        let mut seen = Vec::new();
        for x in self.occupied_xs() {
            if seen.contains(&x) {
                return Err(LaneError::DuplicateTile { x });
            }
            seen.push(x);
        }

        match &self.kind {
            LaneKind::Forest { obstacles } => {
                for obstacle in obstacles {
                    if !grid.contains_x(obstacle.x) {
                        return Err(LaneError::ObstacleOutOfBounds { x: obstacle.x });
                    }
                }
            }
            LaneKind::Road { speed, vehicles, .. } => {
                if !speed.is_finite() || *speed <= 0.0 {
                    return Err(LaneError::InvalidSpeed { speed: *speed });
                }
                for vehicle in vehicles {
                    if vehicle.initial_x < grid.road_loop_min
                        || vehicle.initial_x > grid.road_loop_max
                    {
                        return Err(LaneError::VehicleOutOfBounds { x: vehicle.initial_x });
                    }
                }
            }
        }

        for item in &self.items {
            if !grid.contains_x(item.x) {
                return Err(LaneError::ItemOutOfBounds { x: item.x });
            }
        }

        Ok(())
    }
}

/// Malformed lane data supplied from outside the generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaneError {
    /// An obstacle sits outside the playable range.
    #[error("obstacle at x={x} is outside the playable range")]
    ObstacleOutOfBounds {
        /// Offending tile x.
        x: i32,
    },

    /// A vehicle sits outside the road loop.
    #[error("vehicle at x={x} is outside the road loop")]
    VehicleOutOfBounds {
        /// Offending tile x.
        x: i32,
    },

    /// An item sits outside the playable range.
    #[error("item at x={x} is outside the playable range")]
    ItemOutOfBounds {
        /// Offending tile x.
        x: i32,
    },

    /// Two entities share an x within one lane.
    #[error("two entities share x={x} in one lane")]
    DuplicateTile {
        /// Duplicated tile x.
        x: i32,
    },

    /// Road speed is zero, negative, or not finite.
    #[error("road speed {speed} is not a positive finite value")]
    InvalidSpeed {
        /// Offending speed.
        speed: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::item::ItemKind;

    #[test]
    fn test_forest_blocks_only_obstacle_tiles() {
        let lane = Lane::forest(
            vec![Obstacle { x: 3, kind: ObstacleKind::Tree01 }],
            vec![],
        );

        assert!(lane.blocks(3));
        assert!(!lane.blocks(2));
        assert!(!lane.is_road());
    }

    #[test]
    fn test_road_never_blocks() {
        let lane = Lane::road(
            Direction::Right,
            1.0,
            vec![Vehicle::new(4, VehicleKind::Car01)],
            vec![],
        );

        // Vehicles move; validity checks ignore them
        assert!(!lane.blocks(4));
        assert!(lane.is_road());
    }

    #[test]
    fn test_take_item_at_most_once() {
        let mut lane = Lane::forest(vec![], vec![ItemSpawn::new(5, ItemKind::Clock)]);

        let taken = lane.take_item_at(5);
        assert_eq!(taken, Some(ItemSpawn::new(5, ItemKind::Clock)));

        // Consumed; cannot re-trigger
        assert!(lane.take_item_at(5).is_none());
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_obstacle() {
        let grid = GridConfig::default();
        let lane = Lane::forest(
            vec![Obstacle { x: 99, kind: ObstacleKind::Tree02 }],
            vec![],
        );

        assert_eq!(
            lane.validate(&grid),
            Err(LaneError::ObstacleOutOfBounds { x: 99 })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_tiles() {
        let grid = GridConfig::default();
        let lane = Lane::forest(
            vec![
                Obstacle { x: 2, kind: ObstacleKind::Tree01 },
                Obstacle { x: 2, kind: ObstacleKind::Tree03 },
            ],
            vec![],
        );

        assert_eq!(lane.validate(&grid), Err(LaneError::DuplicateTile { x: 2 }));
    }

    #[test]
    fn test_validate_rejects_bad_speed() {
        let grid = GridConfig::default();
        let lane = Lane::road(Direction::Left, 0.0, vec![], vec![]);
        assert_eq!(lane.validate(&grid), Err(LaneError::InvalidSpeed { speed: 0.0 }));

        let lane = Lane::road(Direction::Left, f32::NAN, vec![], vec![]);
        assert!(matches!(lane.validate(&grid), Err(LaneError::InvalidSpeed { .. })));
    }

    #[test]
    fn test_empty_lane_is_valid() {
        let grid = GridConfig::default();
        let lane = Lane::forest(vec![], vec![]);
        assert!(lane.validate(&grid).is_ok());
    }

    #[test]
    fn test_kind_variant_tables() {
        assert_eq!(ObstacleKind::from_index(0), ObstacleKind::Tree01);
        assert_eq!(ObstacleKind::from_index(7), ObstacleKind::Tree04);
        assert_eq!(VehicleKind::from_index(7), VehicleKind::Car08);
        assert_eq!(VehicleKind::from_index(8), VehicleKind::Car01);
    }
}
