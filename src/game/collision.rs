//! Vehicle Collision
//!
//! Interval-overlap hit test between the player token and the vehicles
//! of the lane row the player currently occupies. Checked every tick,
//! not only on step commits, so a car sweeping through a stationary
//! player still registers.

use crate::game::lane::{Lane, LaneKind};

/// Half-width of the player token along x, in tile units.
pub const PLAYER_HALF_WIDTH: f32 = 0.4;

/// Half-width of a vehicle along x, in tile units.
pub const VEHICLE_HALF_WIDTH: f32 = 1.0;

/// Whether any vehicle in the lane overlaps the player's x interval.
///
/// Forest lanes never collide; their obstacles were already rejected at
/// move validation. `player_x` is the interpolated world x so mid-step
/// positions are judged where the token actually is.
pub fn vehicle_hit(lane: &Lane, player_x: f32) -> bool {
    let LaneKind::Road { vehicles, .. } = &lane.kind else {
        return false;
    };

    let player_min = player_x - PLAYER_HALF_WIDTH;
    let player_max = player_x + PLAYER_HALF_WIDTH;

    vehicles.iter().any(|vehicle| {
        let vehicle_min = vehicle.x - VEHICLE_HALF_WIDTH;
        let vehicle_max = vehicle.x + VEHICLE_HALF_WIDTH;
        player_max > vehicle_min && player_min < vehicle_max
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::lane::{Direction, Obstacle, ObstacleKind, Vehicle, VehicleKind};

    fn road_with_car_at(x: f32) -> Lane {
        let mut vehicle = Vehicle::new(0, VehicleKind::Car03);
        vehicle.x = x;
        Lane::road(Direction::Right, 1.0, vec![vehicle], vec![])
    }

    #[test]
    fn test_overlap_hits() {
        let lane = road_with_car_at(0.0);

        assert!(vehicle_hit(&lane, 0.0));
        assert!(vehicle_hit(&lane, 1.0));
        assert!(vehicle_hit(&lane, -1.3));
    }

    #[test]
    fn test_clearance_misses() {
        let lane = road_with_car_at(0.0);

        // Intervals touch at exactly 1.4 apart; touching is not a hit
        assert!(!vehicle_hit(&lane, 1.4));
        assert!(!vehicle_hit(&lane, -1.4));
        assert!(!vehicle_hit(&lane, 5.0));
    }

    #[test]
    fn test_forest_never_hits() {
        let lane = Lane::forest(
            vec![Obstacle { x: 0, kind: ObstacleKind::Tree01 }],
            vec![],
        );
        assert!(!vehicle_hit(&lane, 0.0));
    }

    #[test]
    fn test_any_vehicle_in_lane_counts() {
        let mut far = Vehicle::new(-10, VehicleKind::Car01);
        far.x = -10.0;
        let mut near = Vehicle::new(2, VehicleKind::Car02);
        near.x = 2.5;
        let lane = Lane::road(Direction::Left, 1.5, vec![far, near], vec![]);

        assert!(vehicle_hit(&lane, 2.0));
        assert!(!vehicle_hit(&lane, 6.0));
    }
}
