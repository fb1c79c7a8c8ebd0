//! Visual-servo approach controller
//!
//! Given the proximity ring and the current centroid offset, computes a
//! forward speed that ramps down as the front sensors rise and a
//! proportional differential steering correction. When vision reports no
//! match this tick the previous tick's steering error is reused, so a
//! transient occlusion does not snap the steering back to zero — and a
//! drought of detections holds the most recent real value, not zero.

use crate::avoidance::{ProximityReadings, PS_FRONT_LEFT, PS_FRONT_RIGHT};
use crate::config::ControllerConfig;
use crate::motor::WheelSpeeds;

/// Output of one approach computation
#[derive(Clone, Copy, Debug)]
pub struct ApproachOutput {
    /// Wheel command for this tick, clamped to the actuator limit
    pub speeds: WheelSpeeds,
    /// Max of the two front proximity sensors; gates phase advancement
    pub front_value: f32,
    /// Steering error used this tick; the caller carries it as the next
    /// tick's `last_error`
    pub error: f32,
}

/// Compute one tick of the approach behavior.
///
/// # Arguments
///
/// * `ps` - Current proximity ring readings
/// * `offset` - Centroid offset from vision, `None` when nothing matched
/// * `last_error` - Steering error carried from the previous tick
/// * `config` - Controller tuning constants
pub fn approach(
    ps: &ProximityReadings,
    offset: Option<f32>,
    last_error: f32,
    config: &ControllerConfig,
) -> ApproachOutput {
    let front_value = ps[PS_FRONT_RIGHT].max(ps[PS_FRONT_LEFT]);
    let threshold = config.target_reached_threshold;

    // Linear ramp from wander speed (far) down to the floor speed (reached)
    let base_speed = if front_value >= threshold {
        config.min_speed
    } else {
        config.wander_speed - (config.wander_speed - config.min_speed) * (front_value / threshold)
    };

    let error = offset.unwrap_or(last_error);
    let turn = config.kp * error;

    let limit = config.max_wheel_speed;
    let speeds = WheelSpeeds::new(
        (base_speed - turn).clamp(-limit, limit),
        (base_speed + turn).clamp(-limit, limit),
    );

    ApproachOutput {
        speeds,
        front_value,
        error,
    }
}
