//! chroma_rover_core - Pure no_std control logic for the chroma_rover robot
//!
//! This crate contains the platform-agnostic behavioral controller for a
//! differential drive robot performing a search-approach-deliver task:
//! locate a red object, push it to a green drop zone, then return to the
//! blue home pad. All code here can be tested on host without any feature
//! flags or platform dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Device capabilities injected via traits
//! - **No I/O**: diagnostics are returned as data; the platform layer logs
//!
//! # Modules
//!
//! - [`traits`]: Device capability abstractions (Camera)
//! - [`motor`]: Wheel speed command type and drive abstraction
//! - [`config`]: Controller tuning constants
//! - [`vision`]: Color classification and frame sampling
//! - [`avoidance`]: Proximity-ring wander and turn-away policy
//! - [`approach`]: Visual-servo approach controller
//! - [`mission`]: Top-level mission state machine

#![no_std]

pub mod approach;
pub mod avoidance;
pub mod config;
pub mod mission;
pub mod motor;
pub mod traits;
pub mod vision;
