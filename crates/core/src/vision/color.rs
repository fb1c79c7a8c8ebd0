//! HSV conversion and hue-window color classification
//!
//! The three mission colors occupy disjoint hue windows with deliberate
//! gaps between them: an ambiguous hue (say 180, cyan) is ignored rather
//! than misclassified.

use core::fmt;

use libm::fmodf;

/// Lower bound of the green hue window (degrees)
const GREEN_HUE_MIN: f32 = 70.0;
/// Upper bound of the green hue window (degrees)
const GREEN_HUE_MAX: f32 = 150.0;
/// Lower bound of the blue hue window (degrees)
const BLUE_HUE_MIN: f32 = 200.0;
/// Upper bound of the blue hue window (degrees)
const BLUE_HUE_MAX: f32 = 260.0;
/// Red wraps around 0: h < 20 or h > 340
const RED_HUE_LOW: f32 = 20.0;
const RED_HUE_HIGH: f32 = 340.0;

/// Color in hue/saturation/value space
///
/// Hue in degrees [0, 360), saturation and value in [0, 1]. Achromatic
/// colors (saturation 0) carry hue 0 by convention.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsv {
    /// Hue in degrees [0, 360)
    pub h: f32,
    /// Saturation [0, 1]
    pub s: f32,
    /// Value (brightness) [0, 1]
    pub v: f32,
}

/// The three colors the mission sequences through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetColor {
    /// The object to collect
    Red,
    /// The drop zone
    Green,
    /// The home pad
    Blue,
}

impl TargetColor {
    /// Name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            TargetColor::Red => "red",
            TargetColor::Green => "green",
            TargetColor::Blue => "blue",
        }
    }

    /// True when `hue` (degrees) falls inside this color's window
    pub fn matches_hue(&self, hue: f32) -> bool {
        match self {
            TargetColor::Red => hue < RED_HUE_LOW || hue > RED_HUE_HIGH,
            TargetColor::Green => (GREEN_HUE_MIN..=GREEN_HUE_MAX).contains(&hue),
            TargetColor::Blue => (BLUE_HUE_MIN..=BLUE_HUE_MAX).contains(&hue),
        }
    }
}

impl fmt::Display for TargetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert raw channel values to HSV.
///
/// # Arguments
///
/// * `r`, `g`, `b` - Channel values in [0, 255]. Averaged (fractional)
///   values are accepted, which is why the inputs are floats.
///
/// # Returns
///
/// [`Hsv`] with hue in [0, 360). Equal channels yield hue 0, saturation 0.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> Hsv {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;

    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;

    let h = if delta == 0.0 {
        0.0
    } else if cmax == r {
        // fmodf can return a negative remainder; wrap into [0, 6)
        let sector = fmodf((g - b) / delta, 6.0);
        60.0 * if sector < 0.0 { sector + 6.0 } else { sector }
    } else if cmax == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if cmax == 0.0 { 0.0 } else { delta / cmax };

    Hsv { h, s, v: cmax }
}

/// Classify an HSV color as one of the mission colors.
///
/// Returns `None` when saturation is below `saturation_floor` (too
/// achromatic to trust) or when the hue falls in a gap between the three
/// windows.
pub fn classify(hsv: Hsv, saturation_floor: f32) -> Option<TargetColor> {
    if hsv.s < saturation_floor {
        return None;
    }
    [TargetColor::Red, TargetColor::Green, TargetColor::Blue]
        .into_iter()
        .find(|color| color.matches_hue(hsv.h))
}
