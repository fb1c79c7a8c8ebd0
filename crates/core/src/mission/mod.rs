//! Mission state machine
//!
//! Top-level behavioral controller sequencing the three search/approach
//! pairs. Owns all cross-tick state: the current phase and the last
//! steering error. Everything else is recomputed from the devices each
//! tick.
//!
//! The two detection tiers have different tolerance on purpose: the coarse
//! presence check gates phase membership strictly (one missed tick in an
//! approach phase drops straight back to search), while the approach
//! controller's own offset fallback tolerates transient centroid loss
//! within a locked phase.

mod state;

pub use state::{ApproachTelemetry, MissionEvent, MissionPhase, StepOutput, MAX_MISSION_EVENTS};

use heapless::Vec;

use crate::approach::approach;
use crate::avoidance::{avoid_obstacles, ProximityReadings};
use crate::config::ControllerConfig;
use crate::motor::WheelSpeeds;
use crate::traits::Camera;
use crate::vision::color::TargetColor;
use crate::vision::sampler::{detect_color, target_offset};

/// Top-level mission controller.
///
/// Call [`step`](MissionController::step) once per scheduler tick with the
/// current camera and proximity readings; apply the returned command (when
/// `Some`) to the drive and render the returned events/telemetry.
#[derive(Clone, Debug)]
pub struct MissionController {
    phase: MissionPhase,
    /// Steering error carried across ticks; only the approach fallback
    /// logic mutates it, and it survives phase changes.
    last_error: f32,
    config: ControllerConfig,
}

impl MissionController {
    /// Create a controller in `SearchRed` with default tuning
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// Create a controller in `SearchRed` with custom tuning
    pub fn with_config(config: ControllerConfig) -> Self {
        Self {
            phase: MissionPhase::SearchRed,
            last_error: 0.0,
            config,
        }
    }

    /// Current mission phase
    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    /// Steering error carried from the last approach tick
    pub fn last_error(&self) -> f32 {
        self.last_error
    }

    /// True once the home pad has been reached
    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Get the active tuning constants
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Run one control tick.
    ///
    /// Reads a coarse detection from the camera, branches on the current
    /// phase, and produces the wheel command plus any transition events.
    /// Once the mission is complete every subsequent tick commands zero
    /// velocity and emits nothing.
    pub fn step(&mut self, camera: &dyn Camera, ps: &ProximityReadings) -> StepOutput {
        let mut events: Vec<MissionEvent, MAX_MISSION_EVENTS> = Vec::new();
        let mut telemetry = None;

        let seen = detect_color(camera);

        // Every non-terminal phase tracks exactly one color, so the phase's
        // target color doubles as the terminal check.
        let command = match self.phase.target_color() {
            None => Some(WheelSpeeds::stopped()),
            Some(color) if self.phase.is_search() => {
                self.search_tick(color, seen, ps, &mut events)
            }
            Some(color) => self.approach_tick(color, seen, camera, ps, &mut events, &mut telemetry),
        };

        StepOutput {
            command,
            events,
            approach: telemetry,
        }
    }

    /// One tick of a search phase: transition on detection, wander
    /// otherwise. The transition tick issues no command of its own.
    fn search_tick(
        &mut self,
        color: TargetColor,
        seen: Option<TargetColor>,
        ps: &ProximityReadings,
        events: &mut Vec<MissionEvent, MAX_MISSION_EVENTS>,
    ) -> Option<WheelSpeeds> {
        if seen == Some(color) {
            let _ = events.push(MissionEvent::TargetAcquired(color));
            self.phase = self.phase.advance();
            None
        } else {
            Some(avoid_obstacles(ps, &self.config))
        }
    }

    /// One tick of an approach phase.
    ///
    /// Coarse lock lost: roll straight at half wander speed and revert to
    /// the search phase. Lock held: run the approach controller; crossing
    /// the reached threshold advances to the next phase (or stops the
    /// wheels when that is the terminal phase).
    fn approach_tick(
        &mut self,
        color: TargetColor,
        seen: Option<TargetColor>,
        camera: &dyn Camera,
        ps: &ProximityReadings,
        events: &mut Vec<MissionEvent, MAX_MISSION_EVENTS>,
        telemetry: &mut Option<ApproachTelemetry>,
    ) -> Option<WheelSpeeds> {
        if seen != Some(color) {
            self.phase = self.phase.retreat();
            return Some(WheelSpeeds::straight(self.config.wander_speed / 2.0));
        }

        let offset = target_offset(camera, color);
        let result = approach(ps, offset, self.last_error, &self.config);
        self.last_error = result.error;

        *telemetry = Some(ApproachTelemetry {
            target: color,
            error: result.error,
            speeds: result.speeds,
            front_value: result.front_value,
        });

        if result.front_value >= self.config.target_reached_threshold {
            let _ = events.push(MissionEvent::TargetReached(color));
            self.phase = self.phase.advance();
            if self.phase.is_terminal() {
                let _ = events.push(MissionEvent::MissionComplete);
                return Some(WheelSpeeds::stopped());
            }
        }

        Some(result.speeds)
    }
}

impl Default for MissionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockCamera, MockFrame};

    const RED: [u8; 3] = [200, 30, 30];

    fn camera(frame: Option<MockFrame>) -> MockCamera {
        let mut camera = MockCamera::new(60, 30);
        camera.set_frame(frame);
        camera
    }

    #[test]
    fn test_initial_state() {
        let controller = MissionController::new();
        assert_eq!(controller.phase(), MissionPhase::SearchRed);
        assert!((controller.last_error() - 0.0).abs() < 0.001);
        assert!(!controller.is_complete());
    }

    #[test]
    fn test_search_without_detection_wanders() {
        let mut controller = MissionController::new();
        let cam = camera(Some(MockFrame::gray()));
        let ps = [0.0; 8];
        let out = controller.step(&cam, &ps);
        assert_eq!(controller.phase(), MissionPhase::SearchRed);
        assert_eq!(out.command, Some(WheelSpeeds::straight(2.0)));
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_search_missing_frame_wanders() {
        let mut controller = MissionController::new();
        let cam = camera(None);
        let ps = [0.0; 8];
        let out = controller.step(&cam, &ps);
        assert_eq!(controller.phase(), MissionPhase::SearchRed);
        assert!(out.command.is_some());
    }

    #[test]
    fn test_acquisition_transitions_without_command() {
        let mut controller = MissionController::new();
        let cam = camera(Some(MockFrame::solid(RED)));
        let ps = [0.0; 8];
        let out = controller.step(&cam, &ps);
        assert_eq!(controller.phase(), MissionPhase::ApproachRed);
        assert!(out.command.is_none());
        assert_eq!(out.events[0], MissionEvent::TargetAcquired(TargetColor::Red));
    }

    #[test]
    fn test_wrong_color_does_not_acquire() {
        let mut controller = MissionController::new();
        let cam = camera(Some(MockFrame::solid([30, 30, 200])));
        let ps = [0.0; 8];
        let out = controller.step(&cam, &ps);
        assert_eq!(controller.phase(), MissionPhase::SearchRed);
        assert!(out.events.is_empty());
        assert!(out.command.is_some());
    }

    #[test]
    fn test_approach_emits_telemetry() {
        let mut controller = MissionController::new();
        let cam = camera(Some(MockFrame::solid(RED)));
        let ps = [0.0; 8];
        controller.step(&cam, &ps); // acquire
        let out = controller.step(&cam, &ps); // approach
        let telemetry = out.approach.expect("approach tick emits telemetry");
        assert_eq!(telemetry.target, TargetColor::Red);
        assert!(out.command.is_some());
    }

    #[test]
    fn test_lost_lock_reverts_to_search() {
        let mut controller = MissionController::new();
        let red_cam = camera(Some(MockFrame::solid(RED)));
        let gray_cam = camera(Some(MockFrame::gray()));
        let ps = [0.0; 8];
        controller.step(&red_cam, &ps);
        assert_eq!(controller.phase(), MissionPhase::ApproachRed);
        let out = controller.step(&gray_cam, &ps);
        assert_eq!(controller.phase(), MissionPhase::SearchRed);
        // Half wander speed, straight
        assert_eq!(out.command, Some(WheelSpeeds::straight(2.0)));
        assert!(out.events.is_empty());
    }
}
