//! Software-in-the-loop harness for the chroma_rover controller.
//!
//! Provides a lightweight built-in arena simulation (differential drive
//! kinematics, synthesized camera frames and proximity readings) that
//! implements the core crate's device capability traits, plus a
//! synchronous tick-loop runner. Suitable for CI testing and rapid
//! iteration with no external simulator.

pub mod arena;
pub mod error;
pub mod runner;

pub use arena::{Arena, ArenaConfig, Beacon};
pub use error::SimulatorError;
pub use runner::{run_mission, RunSummary};
