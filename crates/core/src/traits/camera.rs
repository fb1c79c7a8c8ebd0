//! Camera abstraction for platform-agnostic frame sampling.
//!
//! This module provides the `Camera` trait that abstracts over different
//! image sources (simulator render, hardware camera, mock) so the vision
//! code can run on host without embedded dependencies.

/// Raw pixel channel triple, each channel in [0, 255]
pub type Rgb = [u8; 3];

/// Platform-agnostic camera capability.
///
/// Implementations expose the most recent frame as addressable pixels.
/// A frame may be momentarily unavailable (device still starting, dropped
/// frame); `pixel` returns `None` in that case and the vision layer
/// degrades gracefully.
pub trait Camera {
    /// Frame width in pixels
    fn width(&self) -> u32;

    /// Frame height in pixels
    fn height(&self) -> u32;

    /// Read one pixel of the current frame.
    ///
    /// Returns `None` when no frame is available this tick. Coordinates
    /// outside the frame are a caller bug; implementations may return the
    /// nearest edge pixel or `None`.
    fn pixel(&self, x: u32, y: u32) -> Option<Rgb>;
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Vertical stripe of a single color spanning `x_min..=x_max`
#[derive(Clone, Copy, Debug)]
pub struct ColorBand {
    /// Band color
    pub color: Rgb,
    /// Leftmost column of the band (inclusive)
    pub x_min: u32,
    /// Rightmost column of the band (inclusive)
    pub x_max: u32,
}

/// Synthetic frame content for [`MockCamera`]
#[derive(Clone, Copy, Debug)]
pub struct MockFrame {
    /// Color of every pixel outside the band
    pub background: Rgb,
    /// Optional colored vertical band
    pub band: Option<ColorBand>,
}

impl MockFrame {
    /// Frame filled with a single color
    pub fn solid(color: Rgb) -> Self {
        Self {
            background: color,
            band: None,
        }
    }

    /// Achromatic gray frame (classified as no color)
    pub fn gray() -> Self {
        Self::solid([128, 128, 128])
    }

    /// Gray frame with one colored vertical band
    pub fn with_band(color: Rgb, x_min: u32, x_max: u32) -> Self {
        Self {
            background: [128, 128, 128],
            band: Some(ColorBand { color, x_min, x_max }),
        }
    }
}

/// Mock camera for testing with controllable frame content.
///
/// Frames are procedural (background plus optional vertical band) so no
/// pixel buffer is needed and the type stays `no_std`-friendly.
#[derive(Clone, Copy, Debug)]
pub struct MockCamera {
    width: u32,
    height: u32,
    frame: Option<MockFrame>,
}

impl MockCamera {
    /// Create a mock camera with no frame available yet
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: None,
        }
    }

    /// Replace the current frame (`None` simulates a dropped frame)
    pub fn set_frame(&mut self, frame: Option<MockFrame>) {
        self.frame = frame;
    }
}

impl Camera for MockCamera {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, _y: u32) -> Option<Rgb> {
        let frame = self.frame?;
        match frame.band {
            Some(band) if x >= band.x_min && x <= band.x_max => Some(band.color),
            _ => Some(frame.background),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frame_yields_none() {
        let camera = MockCamera::new(64, 48);
        assert!(camera.pixel(0, 0).is_none());
    }

    #[test]
    fn test_solid_frame() {
        let mut camera = MockCamera::new(64, 48);
        camera.set_frame(Some(MockFrame::solid([200, 30, 30])));
        assert_eq!(camera.pixel(10, 10), Some([200, 30, 30]));
        assert_eq!(camera.pixel(63, 47), Some([200, 30, 30]));
    }

    #[test]
    fn test_band_bounds_inclusive() {
        let mut camera = MockCamera::new(64, 48);
        camera.set_frame(Some(MockFrame::with_band([30, 30, 200], 8, 15)));
        assert_eq!(camera.pixel(7, 0), Some([128, 128, 128]));
        assert_eq!(camera.pixel(8, 0), Some([30, 30, 200]));
        assert_eq!(camera.pixel(15, 0), Some([30, 30, 200]));
        assert_eq!(camera.pixel(16, 0), Some([128, 128, 128]));
    }
}
