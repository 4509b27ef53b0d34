//! Grid Coordinate Model
//!
//! Integer lane-tile coordinates and the configurable boundaries of the
//! playable grid. The source material shipped two inconsistent boundary
//! revisions, so every boundary here is configuration rather than a
//! hard-coded constant.

use serde::{Serialize, Deserialize};

/// One discrete cell of the movement grid.
///
/// `x` runs across a lane, `z` increases as the player advances.
/// Negative `z` rows form the fixed safe starting zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileCoordinate {
    /// Cross-lane position.
    pub x: i32,
    /// Lane row index (depth).
    pub z: i32,
}

impl TileCoordinate {
    /// The spawn tile.
    pub const ORIGIN: TileCoordinate = TileCoordinate { x: 0, z: 0 };

    /// Create a tile coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Tile offset by the given deltas.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }
}

/// Boundaries of the lane grid.
///
/// The road loop range is wider than the playable range so vehicles
/// enter and leave the visible strip instead of popping at its edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Lowest playable tile x.
    pub min_tile: i32,
    /// Highest playable tile x.
    pub max_tile: i32,
    /// Lower x bound of the vehicle wraparound loop.
    pub road_loop_min: i32,
    /// Upper x bound of the vehicle wraparound loop.
    pub road_loop_max: i32,
    /// Number of pre-built safe rows behind the spawn row.
    pub safe_rows: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_tile: -12,
            max_tile: 12,
            road_loop_min: -16,
            road_loop_max: 16,
            safe_rows: 5,
        }
    }
}

impl GridConfig {
    /// Number of tiles in one lane row.
    pub fn tiles_per_row(&self) -> u32 {
        (self.max_tile - self.min_tile + 1) as u32
    }

    /// Whether an x position lies within the playable range.
    pub fn contains_x(&self, x: i32) -> bool {
        x >= self.min_tile && x <= self.max_tile
    }

    /// The rearmost z the player may stand on.
    ///
    /// Safe rows occupy `[rear_boundary(), 0]`; anything behind them is
    /// off the map.
    pub fn rear_boundary(&self) -> i32 {
        -(self.safe_rows - 1)
    }

    /// Lowest x a vehicle may be placed at during generation.
    pub fn vehicle_slot_min(&self) -> i32 {
        self.road_loop_min + 2
    }

    /// Highest x a vehicle may be placed at during generation.
    pub fn vehicle_slot_max(&self) -> i32 {
        self.road_loop_max - 2
    }

    /// Length of the vehicle wraparound loop in tiles.
    pub fn road_loop_span(&self) -> f32 {
        (self.road_loop_max - self.road_loop_min) as f32
    }
}
