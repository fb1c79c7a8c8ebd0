//! Stride-grid frame sampling
//!
//! Both sampling modes walk the frame at a fixed stride rather than per
//! pixel, trading accuracy for per-tick cost. Coarse detection averages the
//! central window and classifies the single averaged color; centroid mode
//! classifies every sampled pixel against one specific target color and
//! reports the horizontal offset of the matches from image center.
//!
//! The saturation floors differ on purpose: coarse detection (0.3) must be
//! confident before the mission switches state, while centroid matching
//! (0.2) only needs "probably still colored" to keep tracking.

use crate::traits::Camera;
use crate::vision::color::{classify, rgb_to_hsv, TargetColor};

/// Grid stride in pixels, both axes
pub const SAMPLE_STRIDE: u32 = 5;
/// Saturation floor for coarse (state-switching) detection
pub const COARSE_SATURATION_FLOOR: f32 = 0.3;
/// Saturation floor for per-pixel centroid matching
pub const CENTROID_SATURATION_FLOOR: f32 = 0.2;

/// Coarse presence detection over the central window.
///
/// Samples the middle third (both axes) of the frame on the stride grid,
/// averages the raw channels, and classifies the averaged color. Returns
/// `None` when no frame is available, the window is empty, or the averaged
/// color is achromatic or outside every hue window.
pub fn detect_color(camera: &dyn Camera) -> Option<TargetColor> {
    let width = camera.width();
    let height = camera.height();

    let mut sum = [0.0f32; 3];
    let mut samples = 0u32;

    let mut x = width / 3;
    while x < 2 * width / 3 {
        let mut y = height / 3;
        while y < 2 * height / 3 {
            let [r, g, b] = camera.pixel(x, y)?;
            sum[0] += r as f32;
            sum[1] += g as f32;
            sum[2] += b as f32;
            samples += 1;
            y += SAMPLE_STRIDE;
        }
        x += SAMPLE_STRIDE;
    }

    if samples == 0 {
        return None;
    }

    let n = samples as f32;
    let hsv = rgb_to_hsv(sum[0] / n, sum[1] / n, sum[2] / n);
    classify(hsv, COARSE_SATURATION_FLOOR)
}

/// Horizontal centroid offset of `target`-colored pixels from image center.
///
/// Samples the entire frame on the stride grid. A pixel matches when its
/// saturation clears the centroid floor and its hue falls in `target`'s
/// window. Returns `Some(center_x - mean_matching_x)`: matches left of
/// center yield a positive offset. `None` when no frame is available or
/// nothing matched this tick.
pub fn target_offset(camera: &dyn Camera, target: TargetColor) -> Option<f32> {
    let width = camera.width();
    let height = camera.height();
    let center_x = width as f32 / 2.0;

    let mut sum_x = 0.0f32;
    let mut matches = 0u32;

    let mut x = 0;
    while x < width {
        let mut y = 0;
        while y < height {
            let [r, g, b] = camera.pixel(x, y)?;
            let hsv = rgb_to_hsv(r as f32, g as f32, b as f32);
            if hsv.s >= CENTROID_SATURATION_FLOOR && target.matches_hue(hsv.h) {
                sum_x += x as f32;
                matches += 1;
            }
            y += SAMPLE_STRIDE;
        }
        x += SAMPLE_STRIDE;
    }

    if matches == 0 {
        return None;
    }

    Some(center_x - sum_x / matches as f32)
}
