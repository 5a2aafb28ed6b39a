//! Render-surface capabilities and viewport geometry.
//!
//! The camera core never talks to the windowing system. It receives a
//! [`SurfaceCapabilities`] snapshot once at session construction and a
//! fresh [`Viewport`] whenever the window is resized.

/// Capabilities negotiated with the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceCapabilities {
    /// Whether the surface was created with stereo (quad-buffer) output.
    pub stereo: bool,
}

impl SurfaceCapabilities {
    /// Mono-only surface.
    pub const MONO: Self = Self { stereo: false };
    /// Stereo-capable surface.
    pub const STEREO: Self = Self { stereo: true };
}

/// Size of the current render surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Whether frames are currently presented in stereo.
    pub stereo: bool,
}

impl Viewport {
    /// Create a mono viewport.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stereo: false,
        }
    }

    /// Width / height. Only meaningful when [`Self::is_empty`] is false.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// True for a minimized or not-yet-sized surface.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a screen coordinate lies on the surface.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }

    /// Convert a screen coordinate (origin top-left, y down) to normalized
    /// device coordinates (origin center, y up).
    #[must_use]
    pub fn to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        let ndc_x = 2.0 * x / self.width.max(1) as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.height.max(1) as f32;
        (ndc_x, ndc_y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_common_resolutions() {
        assert!((Viewport::new(1920, 1080).aspect() - 16.0 / 9.0).abs() < 1e-6);
        assert!((Viewport::new(600, 800).aspect() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn contains_excludes_far_edges() {
        let vp = Viewport::new(800, 600);
        assert!(vp.contains(0.0, 0.0));
        assert!(vp.contains(799.5, 599.5));
        assert!(!vp.contains(800.0, 10.0));
        assert!(!vp.contains(10.0, -0.1));
    }

    #[test]
    fn ndc_corners_and_center() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.to_ndc(400.0, 300.0), (0.0, 0.0));
        assert_eq!(vp.to_ndc(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(vp.to_ndc(800.0, 600.0), (1.0, -1.0));
    }

    #[test]
    fn zero_sized_surface_is_empty() {
        assert!(Viewport::new(0, 600).is_empty());
        assert!(Viewport::new(800, 0).is_empty());
        assert!(!Viewport::default().is_empty());
    }
}
