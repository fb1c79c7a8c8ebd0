//! Color classification and frame sampling
//!
//! Two layers: [`color`] converts raw channel values to HSV and buckets
//! hues into the three mission colors; [`sampler`] walks the camera frame
//! on a stride grid and produces either a coarse presence result or a
//! horizontal centroid offset for steering.

pub mod color;
pub mod sampler;

pub use color::{classify, rgb_to_hsv, Hsv, TargetColor};
pub use sampler::{detect_color, target_offset};
