//! Viewport tracking across resizes and DPI changes.
//!
//! Normalizes platform resize behavior (Wayland zero-size windows, Retina
//! scaling, DPI migration between monitors) into one render-resolution
//! value. The DPI scale applied to the render surface is capped so very
//! high-density displays do not quadruple the fragment load for a scene
//! this simple.

/// Minimum render dimension; zero-size surfaces panic in wgpu.
pub const MIN_DIMENSION: u32 = 1;

/// Event produced when the render resolution actually changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportChange {
    /// New render target width in pixels.
    pub render_width: u32,
    /// New render target height in pixels.
    pub render_height: u32,
    /// New width / height ratio for the camera projection.
    pub aspect_ratio: f32,
}

/// Tracks window size and scale factor, and derives the render resolution.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    physical_width: u32,
    physical_height: u32,
    scale_factor: f64,
    max_pixel_ratio: f64,
    render_width: u32,
    render_height: u32,
}

impl Viewport {
    /// Create a viewport from the window's initial physical size and scale.
    ///
    /// `max_pixel_ratio` caps the DPI scale contribution; a 3x display with
    /// a cap of 2.0 renders at 2/3 of its physical resolution.
    pub fn new(
        physical_width: u32,
        physical_height: u32,
        scale_factor: f64,
        max_pixel_ratio: f64,
    ) -> Self {
        let mut viewport = Self {
            physical_width: physical_width.max(MIN_DIMENSION),
            physical_height: physical_height.max(MIN_DIMENSION),
            scale_factor,
            max_pixel_ratio: max_pixel_ratio.max(1.0),
            render_width: 0,
            render_height: 0,
        };
        let (w, h) = viewport.derive_render_size();
        viewport.render_width = w;
        viewport.render_height = h;
        viewport
    }

    /// Handle a window resize. Returns a change event only if the render
    /// resolution differs from the current one.
    pub fn handle_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<ViewportChange> {
        self.physical_width = physical_width.max(MIN_DIMENSION);
        self.physical_height = physical_height.max(MIN_DIMENSION);
        self.apply()
    }

    /// Handle a scale factor change (window moved between displays or user
    /// changed display scaling).
    pub fn handle_scale_factor_changed(
        &mut self,
        new_scale_factor: f64,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<ViewportChange> {
        self.scale_factor = new_scale_factor;
        self.handle_resize(physical_width, physical_height)
    }

    /// Current render target width in pixels.
    pub fn render_width(&self) -> u32 {
        self.render_width
    }

    /// Current render target height in pixels.
    pub fn render_height(&self) -> u32 {
        self.render_height
    }

    /// Current aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.render_width as f32 / self.render_height as f32
    }

    /// Current scale factor as reported by the windowing system (uncapped).
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn derive_render_size(&self) -> (u32, u32) {
        let effective = self.scale_factor.min(self.max_pixel_ratio).max(0.1);
        let ratio = effective / self.scale_factor;
        let w = (self.physical_width as f64 * ratio).round() as u32;
        let h = (self.physical_height as f64 * ratio).round() as u32;
        (w.max(MIN_DIMENSION), h.max(MIN_DIMENSION))
    }

    fn apply(&mut self) -> Option<ViewportChange> {
        let (w, h) = self.derive_render_size();
        if w == self.render_width && h == self.render_height {
            return None;
        }
        self.render_width = w;
        self.render_height = h;
        Some(ViewportChange {
            render_width: w,
            render_height: h,
            aspect_ratio: self.aspect_ratio(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_size_matches_physical_at_scale_one() {
        let viewport = Viewport::new(1920, 1080, 1.0, 2.0);
        assert_eq!(viewport.render_width(), 1920);
        assert_eq!(viewport.render_height(), 1080);
    }

    #[test]
    fn test_scale_within_cap_keeps_full_resolution() {
        let viewport = Viewport::new(2880, 1800, 2.0, 2.0);
        assert_eq!(viewport.render_width(), 2880);
        assert_eq!(viewport.render_height(), 1800);
    }

    #[test]
    fn test_scale_above_cap_reduces_render_size() {
        // 3x display capped at 2x: render at 2/3 physical resolution.
        let viewport = Viewport::new(3000, 1800, 3.0, 2.0);
        assert_eq!(viewport.render_width(), 2000);
        assert_eq!(viewport.render_height(), 1200);
    }

    #[test]
    fn test_zero_size_clamped() {
        let mut viewport = Viewport::new(0, 0, 1.0, 2.0);
        assert!(viewport.render_width() >= 1);
        assert!(viewport.render_height() >= 1);

        let change = viewport.handle_resize(1920, 1080);
        assert_eq!(
            change,
            Some(ViewportChange {
                render_width: 1920,
                render_height: 1080,
                aspect_ratio: 1920.0 / 1080.0,
            })
        );
    }

    #[test]
    fn test_no_event_when_resolution_unchanged() {
        let mut viewport = Viewport::new(1920, 1080, 1.0, 2.0);
        assert!(viewport.handle_resize(1920, 1080).is_none());
    }

    #[test]
    fn test_scale_factor_change_emits_event() {
        let mut viewport = Viewport::new(1920, 1080, 1.0, 2.0);
        let change = viewport.handle_scale_factor_changed(3.0, 5760, 3240);
        let change = change.expect("scale change should alter render size");
        // Capped at 2x of the 1920x1080 logical size.
        assert_eq!(change.render_width, 3840);
        assert_eq!(change.render_height, 2160);
        assert_eq!(viewport.scale_factor(), 3.0);
    }

    #[test]
    fn test_aspect_ratio() {
        let viewport = Viewport::new(1600, 900, 1.0, 2.0);
        assert!((viewport.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }
}
