//! Wheel speed command type and drive abstraction
//!
//! The controller emits one [`WheelSpeeds`] command per tick; each command
//! fully overwrites the previous one. Platform-specific actuation (simulator
//! joints, PWM hardware) implements [`MotorDrive`].

/// Motor control error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Actuator hardware unavailable or write failed
    HardwareFault,
}

/// Differential drive wheel speed command (rad/s, negative = reverse)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelSpeeds {
    /// Left wheel angular velocity
    pub left: f32,
    /// Right wheel angular velocity
    pub right: f32,
}

impl WheelSpeeds {
    /// Create a new wheel speed command
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Both wheels stopped
    pub const fn stopped() -> Self {
        Self {
            left: 0.0,
            right: 0.0,
        }
    }

    /// Both wheels forward at the same speed
    pub const fn straight(speed: f32) -> Self {
        Self {
            left: speed,
            right: speed,
        }
    }

    /// True when both wheels are commanded to exactly zero
    pub fn is_stopped(&self) -> bool {
        self.left == 0.0 && self.right == 0.0
    }
}

/// Differential drive abstraction (platform-independent)
///
/// Implementations write the commanded velocities to the two wheel
/// actuators. The range of valid speeds is an actuator property; the
/// controller clamps its own outputs to `ControllerConfig::max_wheel_speed`.
pub trait MotorDrive {
    /// Apply a wheel speed command
    ///
    /// # Errors
    ///
    /// Returns `MotorError::HardwareFault` if the actuator write fails.
    /// The control loop treats a fault as a degraded tick, not a fatal
    /// condition.
    fn set_wheel_speeds(&mut self, speeds: WheelSpeeds) -> Result<(), MotorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_is_zero() {
        let cmd = WheelSpeeds::stopped();
        assert!(cmd.is_stopped());
        assert_eq!(cmd.left, 0.0);
        assert_eq!(cmd.right, 0.0);
    }

    #[test]
    fn test_straight_equal_wheels() {
        let cmd = WheelSpeeds::straight(2.0);
        assert!((cmd.left - cmd.right).abs() < 0.0001);
        assert!(!cmd.is_stopped());
    }

    #[test]
    fn test_new_preserves_sign() {
        let cmd = WheelSpeeds::new(-1.6, 2.4);
        assert!(cmd.left < 0.0);
        assert!(cmd.right > 0.0);
    }
}
