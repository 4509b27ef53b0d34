//! Vehicle Motion
//!
//! Advances road-lane vehicles along x with wraparound over the road
//! loop. Motion is a continuous loop over the configured x-range, not
//! bounded by the playable lane width.

use crate::core::grid::GridConfig;
use crate::game::lane::{Lane, LaneKind};

/// Advance every vehicle in a lane by one frame.
///
/// `time_scale` is the product of active effect modifiers; slow-time
/// scales the elapsed time fed into this system only, never the
/// player's own stepping. Forest lanes are untouched.
pub fn advance_lane(lane: &mut Lane, grid: &GridConfig, dt: f32, time_scale: f32) {
    let LaneKind::Road { direction, speed, vehicles } = &mut lane.kind else {
        return;
    };

    let dx = direction.sign() * *speed * dt * time_scale;
    let loop_min = grid.road_loop_min as f32;
    let loop_max = grid.road_loop_max as f32;

    for vehicle in vehicles.iter_mut() {
        vehicle.x += dx;

        // Loop: off one end, back on the other
        if dx > 0.0 && vehicle.x > loop_max {
            vehicle.x = loop_min;
        } else if dx < 0.0 && vehicle.x < loop_min {
            vehicle.x = loop_max;
        }
    }
}

/// Advance every road lane in the map.
pub fn advance_all(lanes: &mut [Lane], grid: &GridConfig, dt: f32, time_scale: f32) {
    for lane in lanes.iter_mut() {
        advance_lane(lane, grid, dt, time_scale);
    }
}
