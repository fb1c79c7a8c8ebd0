//! Mission state types
//!
//! Pure data types for the search-approach-deliver mission. Event rendering
//! (log lines, telemetry messages) is the platform layer's job.

use heapless::Vec;

use crate::motor::WheelSpeeds;
use crate::vision::color::TargetColor;

/// Maximum mission events emitted per tick (reached + complete on the
/// final approach tick).
pub const MAX_MISSION_EVENTS: usize = 2;

/// The six mission phases plus the terminal state.
///
/// The mission always advances in this order:
/// `SearchRed -> ApproachRed -> SearchGreen -> ApproachGreen ->
/// SearchHome -> ApproachHome -> Complete`, with each approach phase able
/// to fall back to its own search phase when the coarse color lock is lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissionPhase {
    /// Wandering, looking for the red object
    #[default]
    SearchRed,
    /// Closing on the red object
    ApproachRed,
    /// Wandering, looking for the green drop zone
    SearchGreen,
    /// Closing on the green drop zone
    ApproachGreen,
    /// Wandering, looking for the blue home pad
    SearchHome,
    /// Closing on the blue home pad
    ApproachHome,
    /// Mission finished; wheels held at zero
    Complete,
}

impl MissionPhase {
    /// Phase name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            MissionPhase::SearchRed => "search_red",
            MissionPhase::ApproachRed => "approach_red",
            MissionPhase::SearchGreen => "search_green",
            MissionPhase::ApproachGreen => "approach_green",
            MissionPhase::SearchHome => "search_home",
            MissionPhase::ApproachHome => "approach_home",
            MissionPhase::Complete => "complete",
        }
    }

    /// The color this phase is looking for or tracking, if any
    pub fn target_color(&self) -> Option<TargetColor> {
        match self {
            MissionPhase::SearchRed | MissionPhase::ApproachRed => Some(TargetColor::Red),
            MissionPhase::SearchGreen | MissionPhase::ApproachGreen => Some(TargetColor::Green),
            MissionPhase::SearchHome | MissionPhase::ApproachHome => Some(TargetColor::Blue),
            MissionPhase::Complete => None,
        }
    }

    /// True for the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, MissionPhase::Complete)
    }

    /// True for the wandering phases
    pub fn is_search(&self) -> bool {
        matches!(
            self,
            MissionPhase::SearchRed | MissionPhase::SearchGreen | MissionPhase::SearchHome
        )
    }

    /// The phase that follows this one in the mission sequence.
    /// `Complete` stays put.
    pub fn advance(&self) -> MissionPhase {
        match self {
            MissionPhase::SearchRed => MissionPhase::ApproachRed,
            MissionPhase::ApproachRed => MissionPhase::SearchGreen,
            MissionPhase::SearchGreen => MissionPhase::ApproachGreen,
            MissionPhase::ApproachGreen => MissionPhase::SearchHome,
            MissionPhase::SearchHome => MissionPhase::ApproachHome,
            MissionPhase::ApproachHome => MissionPhase::Complete,
            MissionPhase::Complete => MissionPhase::Complete,
        }
    }

    /// The search phase an approach phase drops back to when the coarse
    /// color lock is lost. Search phases and `Complete` stay put.
    pub fn retreat(&self) -> MissionPhase {
        match self {
            MissionPhase::ApproachRed => MissionPhase::SearchRed,
            MissionPhase::ApproachGreen => MissionPhase::SearchGreen,
            MissionPhase::ApproachHome => MissionPhase::SearchHome,
            other => *other,
        }
    }
}

/// Events emitted by the mission controller for the platform layer to
/// announce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionEvent {
    /// Coarse detection saw the phase's color; switching to approach
    TargetAcquired(TargetColor),
    /// Front sensors crossed the reached threshold on the tracked target
    TargetReached(TargetColor),
    /// The home pad was reached; the mission is over
    MissionComplete,
}

/// Per-tick approach diagnostics: tracked color, steering error, and the
/// issued wheel speeds.
#[derive(Clone, Copy, Debug)]
pub struct ApproachTelemetry {
    /// Color being tracked
    pub target: TargetColor,
    /// Steering error used this tick (may be the held value)
    pub error: f32,
    /// Wheel command issued by the approach controller
    pub speeds: WheelSpeeds,
    /// Max of the two front proximity sensors
    pub front_value: f32,
}

/// Result of one controller tick.
#[derive(Clone, Debug, Default)]
pub struct StepOutput {
    /// Wheel command for this tick. `None` means the actuators keep their
    /// previous velocities (the detection-gated transition ticks).
    pub command: Option<WheelSpeeds>,
    /// Phase transition events, at most [`MAX_MISSION_EVENTS`]
    pub events: Vec<MissionEvent, MAX_MISSION_EVENTS>,
    /// Approach diagnostics when this tick ran the approach controller
    pub approach: Option<ApproachTelemetry>,
}
