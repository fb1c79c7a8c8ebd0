//! Synchronous tick-loop runner.
//!
//! Drives the mission controller against an [`Arena`] one tick at a time:
//! advance the world, read sensors, step the controller, apply the wheel
//! command, and render events and approach diagnostics through `tracing`.
//! The loop exits when the mission completes or the tick budget runs out.

use tracing::{debug, info, warn};

use chroma_rover_core::mission::{MissionController, MissionEvent, MissionPhase};
use chroma_rover_core::motor::MotorDrive;

use crate::arena::Arena;

/// Outcome of a simulated mission run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Ticks executed
    pub ticks: u64,
    /// True when the mission reached the terminal phase
    pub completed: bool,
    /// Phase the controller ended in
    pub final_phase: MissionPhase,
}

/// Run the controller against the arena for at most `max_ticks` ticks.
pub fn run_mission(
    arena: &mut Arena,
    controller: &mut MissionController,
    max_ticks: u64,
) -> RunSummary {
    for tick in 0..max_ticks {
        arena.step();
        let ps = arena.proximity();
        let out = controller.step(arena, &ps);

        for event in &out.events {
            match event {
                MissionEvent::TargetAcquired(color) => {
                    info!(color = color.name(), "target acquired; approaching");
                }
                MissionEvent::TargetReached(color) => {
                    info!(color = color.name(), "target reached");
                }
                MissionEvent::MissionComplete => {
                    info!("mission complete");
                }
            }
        }

        if let Some(telemetry) = out.approach {
            debug!(
                target = telemetry.target.name(),
                error = telemetry.error,
                left = telemetry.speeds.left,
                right = telemetry.speeds.right,
                front = telemetry.front_value,
                "approach"
            );
        }

        if let Some(command) = out.command {
            // A drive fault degrades this tick; the next command overwrites
            if let Err(err) = arena.set_wheel_speeds(command) {
                warn!(?err, "wheel command failed");
            }
        }

        if controller.is_complete() {
            let parked = out.command.is_some_and(|cmd| cmd.is_stopped());
            debug!(parked, "wheels parked at mission end");
            return RunSummary {
                ticks: tick + 1,
                completed: true,
                final_phase: controller.phase(),
            };
        }
    }

    RunSummary {
        ticks: max_ticks,
        completed: false,
        final_phase: controller.phase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Arena, ArenaConfig};

    #[test]
    fn test_empty_arena_never_completes() {
        let config = ArenaConfig {
            seed: Some(1),
            ..ArenaConfig::default()
        };
        let mut arena = Arena::new(config, vec![]).unwrap();
        let mut controller = MissionController::new();
        let summary = run_mission(&mut arena, &mut controller, 50);
        assert!(!summary.completed);
        assert_eq!(summary.ticks, 50);
        assert_eq!(summary.final_phase, MissionPhase::SearchRed);
    }
}
