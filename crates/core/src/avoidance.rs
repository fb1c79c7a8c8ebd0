//! Proximity-ring wander and turn-away policy
//!
//! Pure function of the current ring readings; no state is carried across
//! ticks. Ring indices follow the e-puck mounting: 0/1 are the right-front
//! cluster, 6/7 the left-front cluster.

use crate::config::ControllerConfig;
use crate::motor::WheelSpeeds;

/// One full sweep of the 8-sensor proximity ring, refreshed every tick
pub type ProximityReadings = [f32; 8];

/// Ring index of the right-front sensor
pub const PS_FRONT_RIGHT: usize = 0;
/// Ring index of the left-front sensor
pub const PS_FRONT_LEFT: usize = 7;

/// Wander with turn-away from obstructed flanks.
///
/// When the left flank (ps\[6\]/ps\[7\]) is obstructed the robot turns
/// right; when the right flank (ps\[0\]/ps\[1\]) is obstructed it turns
/// left; otherwise it rolls straight at half wander speed. When both flanks
/// exceed the threshold simultaneously the left-obstacle branch wins.
pub fn avoid_obstacles(ps: &ProximityReadings, config: &ControllerConfig) -> WheelSpeeds {
    let threshold = config.obstacle_threshold;
    let wander = config.wander_speed;

    let left_obstacle = ps[6] > threshold || ps[7] > threshold;
    let right_obstacle = ps[0] > threshold || ps[1] > threshold;

    if left_obstacle {
        WheelSpeeds::new(0.6 * wander, -0.4 * wander)
    } else if right_obstacle {
        WheelSpeeds::new(-0.4 * wander, 0.6 * wander)
    } else {
        WheelSpeeds::straight(0.5 * wander)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ControllerConfig {
        ControllerConfig::default()
    }

    #[test]
    fn test_clear_path_straight() {
        let ps = [0.0; 8];
        let cmd = avoid_obstacles(&ps, &config());
        assert!((cmd.left - 2.0).abs() < 0.001);
        assert!((cmd.right - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_right_obstacle_turns_left() {
        let ps = [0.0, 90.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let cmd = avoid_obstacles(&ps, &config());
        assert!(cmd.left < 0.0, "left wheel should reverse, got {}", cmd.left);
        assert!(cmd.right > cmd.left);
        assert!((cmd.left - (-1.6)).abs() < 0.001);
        assert!((cmd.right - 2.4).abs() < 0.001);
    }

    #[test]
    fn test_left_obstacle_turns_right() {
        let ps = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 90.0, 90.0];
        let cmd = avoid_obstacles(&ps, &config());
        assert!((cmd.left - 2.4).abs() < 0.001);
        assert!((cmd.right - (-1.6)).abs() < 0.001);
    }

    #[test]
    fn test_both_flanks_left_wins() {
        let ps = [90.0, 90.0, 0.0, 0.0, 0.0, 0.0, 90.0, 90.0];
        let cmd = avoid_obstacles(&ps, &config());
        // Same command as the left-obstacle-only case
        assert!((cmd.left - 2.4).abs() < 0.001);
        assert!((cmd.right - (-1.6)).abs() < 0.001);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly at the threshold does not count as obstructed
        let ps = [80.0, 80.0, 0.0, 0.0, 0.0, 0.0, 80.0, 80.0];
        let cmd = avoid_obstacles(&ps, &config());
        assert!((cmd.left - cmd.right).abs() < 0.001);
    }

    #[test]
    fn test_rear_sensors_ignored() {
        let ps = [0.0, 0.0, 500.0, 500.0, 500.0, 500.0, 0.0, 0.0];
        let cmd = avoid_obstacles(&ps, &config());
        assert!((cmd.left - cmd.right).abs() < 0.001);
    }
}
