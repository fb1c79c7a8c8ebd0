//! Controller tuning constants
//!
//! This module contains the single configuration struct shared by the
//! avoidance, approach, and mission layers. Defaults are the values tuned
//! against the e-puck proximity/velocity scales.

/// Configuration for the behavioral controller
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Default forward speed when no target is locked (rad/s)
    pub wander_speed: f32,
    /// Proximity reading above which the tracked object counts as reached
    pub target_reached_threshold: f32,
    /// Floor speed when closing on a target (rad/s)
    pub min_speed: f32,
    /// Proportional gain applied to the visual steering error
    pub kp: f32,
    /// Proximity reading above which a flank counts as obstructed
    pub obstacle_threshold: f32,
    /// Actuator limit; approach wheel speeds are clamped to +/- this value
    pub max_wheel_speed: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            wander_speed: 4.0,
            target_reached_threshold: 150.0,
            min_speed: 0.5,
            kp: 0.01,
            obstacle_threshold: 80.0,
            max_wheel_speed: 6.28,
        }
    }
}
