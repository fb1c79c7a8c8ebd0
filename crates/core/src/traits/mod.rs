//! Device capability abstractions
//!
//! Platform services the controller consumes, injected as traits so the
//! core can be exercised on host without hardware or a simulator.

mod camera;

pub use camera::{Camera, ColorBand, MockCamera, MockFrame, Rgb};
